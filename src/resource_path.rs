use std::path::{Path, PathBuf};

const SOUND_EXTENSIONS: &[&str] = &["ogg", "wav", "mp3", "flac"];

/// Looks for `relative_path` under the configured asset root first, then
/// under `assets/` in the working directory and its parents.
pub fn find_resource(relative_path: &str, assets_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(root) = assets_dir {
        let full_path = root.join(relative_path);
        if full_path.exists() {
            return Some(full_path);
        }
    }

    let search_paths = [
        "",
        "../",
        "../../",
    ];

    for base in &search_paths {
        let full_path = Path::new(base).join("assets").join(relative_path);
        if full_path.exists() {
            return Some(full_path);
        }
    }

    None
}

pub fn find_sound(name: &str, assets_dir: Option<&Path>) -> Option<PathBuf> {
    SOUND_EXTENSIONS
        .iter()
        .find_map(|ext| find_resource(&format!("audio/{}.{}", name, ext), assets_dir))
}

pub fn find_image(name: &str, assets_dir: Option<&Path>) -> Option<PathBuf> {
    find_resource(&format!("images/{}.png", name), assets_dir)
}

/// First `.ttf` in `fonts/`, sorted by name so the pick is stable.
pub fn find_font(assets_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = find_resource("fonts", assets_dir)?;
    let mut fonts: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
                .unwrap_or(false)
        })
        .collect();
    fonts.sort();
    fonts.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn configured_root_wins_and_extensions_are_tried_in_order() {
        let root = std::env::temp_dir().join(format!("color-clicky-assets-{}", std::process::id()));
        fs::create_dir_all(root.join("audio")).unwrap();
        fs::create_dir_all(root.join("fonts")).unwrap();
        fs::write(root.join("audio/hurt.wav"), b"").unwrap();
        fs::write(root.join("fonts/b.ttf"), b"").unwrap();
        fs::write(root.join("fonts/a.ttf"), b"").unwrap();
        fs::write(root.join("fonts/readme.txt"), b"").unwrap();

        assert_eq!(find_sound("hurt", Some(&root)), Some(root.join("audio/hurt.wav")));
        assert_eq!(find_sound("nope", Some(&root)), None);
        assert_eq!(find_font(Some(&root)), Some(root.join("fonts/a.ttf")));

        let _ = fs::remove_dir_all(&root);
    }
}
