use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use flipbook::prelude::*;
use tokio::sync::Semaphore;

fn open(source: Arc<dyn PageSource>, page_count: usize, config: &FlipbookConfig) -> Navigator<Scene> {
    let pages = PageSequence::from_slots((1..=page_count).map(|i| Some(MemoryPageSource::handle_for(i))));
    let cache = AssetCache::new(source, config.cache.capacity, Handle::current());
    Navigator::new(Arc::new(pages), cache, Scene::new(), config)
}

fn memory_book(page_count: usize) -> Navigator<Scene> {
    let source = Arc::new(MemoryPageSource::new().with_pages(page_count));
    open(source, page_count, &FlipbookConfig::default())
}

fn at(t0: Instant, ms: u64) -> Instant {
    t0 + Duration::from_millis(ms)
}

/// Runs a turn to completion and returns the final tick.
async fn complete(nav: &mut Navigator<Scene>, started: Instant) -> TurnTick {
    nav.settle().await;
    nav.tick(at(started, 10_000)).expect("a turn was running")
}

/// Memory source whose fetches wait for permits, to hold prefetch gates closed.
struct GatedSource {
    inner: MemoryPageSource,
    permits: Semaphore,
}

#[async_trait]
impl PageSource for GatedSource {
    fn candidates(&self, page: usize) -> Vec<PageHandle> {
        self.inner.candidates(page)
    }

    async fn exists(&self, handle: &PageHandle) -> bool {
        self.inner.exists(handle).await
    }

    async fn fetch(&self, handle: &PageHandle) -> Result<Vec<u8>, SourceError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| SourceError::NetworkError(e.to_string()))?;
        self.inner.fetch(handle).await
    }
}

#[tokio::test]
async fn five_page_book_ends_on_a_full_spread() {
    let mut nav = memory_book(5);
    let t0 = Instant::now();

    assert!(nav.next(t0));
    complete(&mut nav, t0).await;
    assert_eq!(nav.view(), View::Spread(2));
    assert_eq!(nav.surface().visible_pages(), vec![2, 3]);

    assert!(nav.next(t0));
    complete(&mut nav, t0).await;
    assert_eq!(nav.view(), View::Spread(4));
    assert_eq!(nav.surface().visible_pages(), vec![4, 5]);

    assert!(!nav.view().can_advance(5));
    assert!(!nav.next(t0));

    let mut fresh = memory_book(5);
    assert!(fresh.last());
    assert_eq!(fresh.view(), nav.view());
}

#[tokio::test]
async fn every_page_is_reachable_by_turning() {
    for page_count in 1..=9 {
        let mut nav = memory_book(page_count);
        let t0 = Instant::now();
        let mut seen: Vec<usize> = nav.surface().visible_pages();
        while nav.next(t0) {
            complete(&mut nav, t0).await;
            seen.extend(nav.surface().visible_pages());
        }
        assert_eq!(seen, (1..=page_count).collect::<Vec<_>>(), "page_count {}", page_count);
        assert_eq!(nav.view(), View::last(page_count));
    }
}

#[tokio::test]
async fn short_drag_leaves_the_book_untouched() {
    let mut nav = memory_book(8);
    nav.go_to_spread(1);
    let before = nav.surface().clone();
    let geometry = BookGeometry::new(0.0, 1000.0);
    let t0 = Instant::now();

    assert!(nav.start_drag(Side::Right, PointerInput::new(1, 1000.0, PointerPhase::Start), geometry));
    assert!(nav.update_drag(PointerInput::new(1, 850.0, PointerPhase::Move)));
    let progress = nav.turn_session().and_then(|s| s.progress()).unwrap();
    assert!((progress - 0.30).abs() < 1e-6);

    assert!(nav.end_drag(PointerInput::new(1, 850.0, PointerPhase::End), t0));
    let tick = nav.tick(at(t0, FLIP_MS_RETURN)).unwrap();

    let baseline = shade(0.0, TurnDirection::Forward, &ShadingParams::default());
    match tick {
        TurnTick::Cancelled { pose, origin } => {
            assert_eq!(origin, View::Spread(2));
            assert_eq!(pose.deg, 0.0);
            assert_eq!(pose.shade, baseline);
        }
        other => panic!("expected a cancel, got {:?}", other),
    }
    assert!((baseline.static_left - STATIC_MAX / 3.0).abs() < 1e-6);

    assert_eq!(nav.view(), View::Spread(2));
    assert!(nav.surface().turn.is_none());
    assert_eq!(nav.surface().static_shade(), (0.0, 0.0));
    assert_eq!(nav.surface().visible_pages(), before.visible_pages());
    assert_eq!(nav.surface().controls, before.controls);
}

#[tokio::test]
async fn long_drag_commits() {
    let mut nav = memory_book(8);
    nav.go_to_spread(2);
    let geometry = BookGeometry::new(0.0, 1000.0);
    let t0 = Instant::now();

    assert!(nav.start_drag(Side::Left, PointerInput::new(4, 20.0, PointerPhase::Start), geometry));
    nav.update_drag(PointerInput::new(4, 300.0, PointerPhase::Move));
    nav.end_drag(PointerInput::new(4, 300.0, PointerPhase::End), t0);

    nav.settle().await;
    let tick = nav.tick(at(t0, FLIP_MS_DRAG_DONE)).unwrap();
    assert!(matches!(tick, TurnTick::Committed { target: View::Spread(2), .. }));
    assert_eq!(nav.view(), View::Spread(2));
}

#[tokio::test]
async fn second_turn_is_rejected_while_one_runs() {
    let mut nav = memory_book(10);
    let t0 = Instant::now();

    assert!(nav.next(t0));
    let plan = nav.turn_session().unwrap().plan().clone();
    assert!(!nav.next(at(t0, 10)));
    assert!(!nav.prev(at(t0, 10)));
    assert_eq!(nav.turn_session().unwrap().plan(), &plan);

    complete(&mut nav, t0).await;
    assert_eq!(nav.view(), View::Spread(2));
    assert!(nav.next(at(t0, 700)));
}

#[tokio::test]
async fn slow_prefetch_holds_the_reveal() {
    let source = Arc::new(GatedSource {
        inner: MemoryPageSource::new().with_pages(8),
        permits: Semaphore::new(0),
    });
    let mut nav = open(source.clone(), 8, &FlipbookConfig::default());
    let t0 = Instant::now();

    assert!(nav.next(t0));
    match nav.tick(at(t0, FLIP_MS)).unwrap() {
        TurnTick::AwaitingGate(pose) => assert_eq!(pose.deg, -180.0),
        other => panic!("expected to wait on the gate, got {:?}", other),
    }
    assert_eq!(nav.view(), View::Cover);
    assert!(nav.is_turning());

    source.permits.add_permits(16);
    nav.settle().await;
    assert!(matches!(
        nav.tick(at(t0, FLIP_MS + 16)).unwrap(),
        TurnTick::Committed { .. }
    ));
    assert_eq!(nav.view(), View::Spread(2));
}

#[tokio::test]
async fn failing_and_missing_pages_degrade_to_blank() {
    let source = MemoryPageSource::new().with_pages(6).failing_page(2);
    let source = Arc::new(source.without_page(3));
    let pages = PageSequence::from_slots([
        Some(MemoryPageSource::handle_for(1)),
        Some(MemoryPageSource::handle_for(2)),
        None,
        Some(MemoryPageSource::handle_for(4)),
    ]);
    let cache = AssetCache::new(source, 40, Handle::current());
    let mut nav = Navigator::new(Arc::new(pages), cache, Scene::new(), &FlipbookConfig::default());
    let t0 = Instant::now();

    assert!(nav.next(t0));
    complete(&mut nav, t0).await;
    assert_eq!(nav.view(), View::Spread(2));

    let scene = nav.surface();
    let left = scene.left.as_ref().unwrap();
    assert_eq!(left.index, 2);
    assert!(!left.asset.is_prepared());
    assert!(scene.right.is_none());
}

#[tokio::test]
async fn reading_a_long_book_keeps_the_cache_bounded() {
    let mut nav = memory_book(120);
    let t0 = Instant::now();
    while nav.next(t0) {
        complete(&mut nav, t0).await;
    }
    assert_eq!(nav.view(), View::Spread(120));
    assert_eq!(nav.cache().len(), CACHE_SIZE);
    assert!(nav.cache().contains(&MemoryPageSource::handle_for(120)));
    assert!(!nav.cache().contains(&MemoryPageSource::handle_for(2)));
}
