#![forbid(unsafe_code)]

pub mod blur;
pub mod canvas;
pub mod composite;
pub mod core;
pub mod device;
pub mod emblem;
pub mod encode;
pub mod error;
pub mod frame;
pub mod gradient;
pub mod pipeline;
pub mod scene;
pub mod scenes;
pub mod shape;
pub mod text;
pub mod theme;
pub mod widgets;

pub use canvas::Canvas;
pub use core::{DpRect, Rect, Rgba};
pub use device::{DeviceProfile, DeviceScaler};
pub use error::{AppshotError, AppshotResult};
pub use pipeline::AssetPipeline;
pub use scene::{HistoryEntry, Overlay, SceneComposer, SceneDescriptor, Widget};
pub use scenes::PromoScene;
pub use shape::ShadowSpec;
pub use text::{Align, FontFamily, FontSpec, ParleyEngine, TextEngine};
pub use theme::Theme;
