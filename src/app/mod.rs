mod controller;
mod state;
mod view;

pub use controller::{Confirm, Controller};
pub use state::{Action, AppState, Effect, Notice, Transition, reduce, submit_draft};
pub use view::ListRow;

#[cfg(test)]
mod tests;
