//! Round data: board content, coordinates and placed stones.

pub use self::{content::*, coords::*, stone::*};

pub(crate) mod content;
pub(crate) mod coords;
pub(crate) mod stone;
