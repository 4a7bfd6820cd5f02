//! Terminal User Interface module.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse input handling
//! - `events` - Application event processing
//! - `surface` - Render target holding what the frame shows
//! - `render` - Frame layout
//! - `cards` - Card tiles and the detail popout
//! - `nav` - Job list widget
//! - `status` - Status bar widget

mod cards;
mod events;
mod input;
mod loop_runner;
mod nav;
mod render;
mod status;
mod surface;

pub use events::handle_app_event;
pub use input::{handle_key, handle_mouse};
pub use loop_runner::{run, Action};
pub use surface::Surface;
