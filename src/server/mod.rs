mod session;
mod structures;

pub use session::Session;
pub use structures::{Command, Response, DEFAULT_STEP_DT};
