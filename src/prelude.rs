// std
pub use std::fs;
pub use std::num::NonZeroUsize;
pub use std::path::{Path, PathBuf};
pub use std::sync::{Arc, Mutex};
pub use std::time::{Duration, Instant};

// external crates
pub use eframe::{
    CreationContext,
    egui::{
        self, Align, CentralPanel, Color32, ColorImage, Context, Layout, Mesh, Pos2, Rect, RichText,
        Sense, Shape, Spinner, TextStyle, TextureHandle, TextureOptions, Ui, Vec2, pos2, vec2,
    },
};
pub use futures::future::join_all;
pub use image::{DynamicImage, GenericImageView};
pub use log::{debug, warn};
pub use lru::LruCache;
pub use serde::Deserialize;
pub use tokio::{runtime::Handle, task::JoinHandle};

pub use page_source::prelude::*;

// crate modules
pub use crate::{
    app::FlipbookApp,
    book::{LoadedBook, load_book, open_book},
    cache::{AssetCache, PrefetchGate, PreparedAsset, Renderable, SharedPreparedCache, new_prepared_cache},
    config::*,
    error::AppError,
    input::{BookGeometry, NavKey, PointerInput, PointerPhase, Side},
    model::{PagePair, PageSequence, SliderPosition, View, max_left},
    navigator::Navigator,
    surface::{BookSurface, ControlState, PageSlot, Scene, SpreadLayout, TurnFrame},
    turn::{
        DragTrack, ShadeFrame, ShadingParams, TurnController, TurnDirection, TurnPhase, TurnPlan,
        TurnPose, TurnSession, TurnTick, TurnTiming, Tween, ease_in_out, shade,
    },
    ui::log::UiLogger,
};
