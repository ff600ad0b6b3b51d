pub mod debug;
pub mod map;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod scene;
pub mod session;
pub mod settings;
pub mod state;
pub mod ui;
