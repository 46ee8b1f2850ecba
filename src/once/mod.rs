mod once;
mod state;

pub use once::Once;
pub use state::OnceState;
