pub mod line;
pub mod options;
pub mod state;

pub use line::*;
pub use options::*;
pub use state::*;
