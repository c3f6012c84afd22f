//! Interactive wizard surface
//!
//! [`WizardRepl`] drives a [`WizardController`](ekyc_application::WizardController)
//! from stdin and renders its events through [`WizardPresenter`].

pub mod command;
pub mod presenter;
pub mod repl;

pub use command::{CommandError, WizardCommand};
pub use presenter::WizardPresenter;
pub use repl::{Flow, WizardRepl};
