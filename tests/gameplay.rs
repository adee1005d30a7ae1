use color_clicky::audio::events::{AudioEvent, AudioEventQueue};
use color_clicky::game::layout::PLAY_POS;
use color_clicky::game::lifecycle::LifecycleEvent;
use color_clicky::game::session::{TIMER_FRAME_DECAY, TIMER_MISS_PENALTY, TIMER_START_SCALE};
use color_clicky::game::{SceneId, SceneManager};
use color_clicky::storage::{KeyValueStore, MemoryStore, HIGH_SCORE_KEY};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DT: f32 = 1.0 / 60.0;

fn manager_with(store: MemoryStore) -> SceneManager {
    SceneManager::new(Box::new(store), StdRng::seed_from_u64(99))
}

fn start(scenes: &mut SceneManager, audio: &mut AudioEventQueue) {
    scenes.handle_pointer(PLAY_POS, audio);
    assert_eq!(scenes.current(), SceneId::Game);
}

fn click_target(scenes: &mut SceneManager, audio: &mut AudioEventQueue) {
    let game = scenes.game_mut().unwrap();
    let target = game.session().target_index();
    game.click(target, audio);
}

fn click_wrong(scenes: &mut SceneManager, audio: &mut AudioEventQueue) {
    let game = scenes.game_mut().unwrap();
    let wrong = (game.session().target_index() + 1) % 4;
    game.click(wrong, audio);
}

/// Ticks until the game hands control back to the menu.
fn run_until_menu(scenes: &mut SceneManager) -> usize {
    let mut ticks = 0;
    while scenes.current() == SceneId::Game {
        scenes.update(DT);
        ticks += 1;
        assert!(ticks < 10_000, "timer never ran out");
    }
    ticks
}

#[test]
fn five_correct_clicks_score_five_without_penalty() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);
    audio.drain();

    for _ in 0..5 {
        click_target(&mut scenes, &mut audio);
        scenes.update(DT);
    }

    let game = scenes.game().unwrap();
    assert_eq!(game.session().score(), 5);
    assert!(!game.is_shaking());
    let expected = TIMER_START_SCALE - 5.0 * TIMER_FRAME_DECAY;
    assert!((game.session().timer_scale() - expected).abs() < 1e-4);
    assert_eq!(audio.drain(), vec![AudioEvent::Points; 5]);
}

#[test]
fn one_wrong_click_costs_time_and_shakes() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);
    audio.drain();

    click_wrong(&mut scenes, &mut audio);

    let game = scenes.game().unwrap();
    assert_eq!(audio.drain(), vec![AudioEvent::Hurt]);
    assert_eq!(game.session().score(), 0);
    assert!(game.is_shaking());
    let expected = TIMER_START_SCALE - TIMER_MISS_PENALTY;
    assert!((game.session().timer_scale() - expected).abs() < 1e-6);
}

#[test]
fn absent_high_score_starts_at_zero() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);
    assert_eq!(scenes.game().unwrap().session().max_score(), 0);
    assert_eq!(scenes.game().unwrap().high_score_text(), "High Score 0");
}

#[test]
fn draining_timer_ends_game_once_and_returns_to_menu() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);

    let ticks = run_until_menu(&mut scenes);
    assert!(ticks >= (TIMER_START_SCALE / TIMER_FRAME_DECAY) as usize - 5);
    assert_eq!(scenes.lifecycle().listener_count(), 0);

    scenes.update(DT);
    assert_eq!(scenes.current(), SceneId::Menu);
    assert_eq!(scenes.store().get(HIGH_SCORE_KEY), None);
}

#[test]
fn high_score_saved_only_on_strict_improvement() {
    let mut store = MemoryStore::new();
    store.set(HIGH_SCORE_KEY, "2").unwrap();
    let mut scenes = manager_with(store);
    let mut audio = AudioEventQueue::new();

    start(&mut scenes, &mut audio);
    for _ in 0..2 {
        click_target(&mut scenes, &mut audio);
    }
    run_until_menu(&mut scenes);
    assert_eq!(scenes.store().get(HIGH_SCORE_KEY).as_deref(), Some("2"));

    start(&mut scenes, &mut audio);
    for _ in 0..3 {
        click_target(&mut scenes, &mut audio);
    }
    for _ in 0..10 {
        click_wrong(&mut scenes, &mut audio);
    }
    run_until_menu(&mut scenes);
    assert_eq!(scenes.store().get(HIGH_SCORE_KEY).as_deref(), Some("3"));
    assert_eq!(scenes.high_score(), 3);

    start(&mut scenes, &mut audio);
    assert_eq!(scenes.game().unwrap().session().max_score(), 3);
}

#[test]
fn music_starts_once_across_round_trips() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();

    start(&mut scenes, &mut audio);
    assert_eq!(audio.drain(), vec![AudioEvent::BackgroundMusic]);
    run_until_menu(&mut scenes);

    start(&mut scenes, &mut audio);
    assert!(audio.drain().is_empty());
    assert!(scenes.menu().music_started());
}

#[test]
fn hidden_window_freezes_the_timer() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);

    scenes.handle_lifecycle(LifecycleEvent::Hidden);
    for _ in 0..100 {
        scenes.update(DT);
    }
    assert_eq!(scenes.game().unwrap().session().timer_scale(), TIMER_START_SCALE);

    scenes.handle_lifecycle(LifecycleEvent::Visible);
    scenes.update(DT);
    assert!(scenes.game().unwrap().session().timer_scale() < TIMER_START_SCALE);
}

#[test]
fn each_new_game_gets_a_fresh_subscription() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    for _ in 0..3 {
        start(&mut scenes, &mut audio);
        assert_eq!(scenes.lifecycle().listener_count(), 1);
        run_until_menu(&mut scenes);
        assert_eq!(scenes.lifecycle().listener_count(), 0);
    }
}

#[test]
fn clicking_on_a_rotated_box_hits_its_color() {
    let mut scenes = manager_with(MemoryStore::new());
    let mut audio = AudioEventQueue::new();
    start(&mut scenes, &mut audio);
    audio.drain();

    for _ in 0..4 {
        let game = scenes.game().unwrap();
        let target = game.session().target_index();
        let pos = game.group().slot_center(target);
        scenes.handle_pointer(pos, &mut audio);
    }
    assert_eq!(scenes.game().unwrap().session().score(), 4);
    assert_eq!(audio.drain(), vec![AudioEvent::Points; 4]);
}
