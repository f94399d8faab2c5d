//! Filmroom Project Model
//!
//! Defines the data contracts consumed by the composition engine:
//! - **Clips:** Immutable descriptors of tagged frame ranges
//! - **Selection:** The ordered sequence of clips chosen for a film
//! - **Videos:** Read-only source video records and their metadata
//! - **Props:** The render props file handed to the external renderer
//!
//! Frame values arriving from the wire are parsed and validated here,
//! before any timeline arithmetic happens.

pub mod clip;
pub mod props;
pub mod selection;
pub mod video;

pub use clip::*;
pub use props::*;
pub use selection::*;
pub use video::*;
