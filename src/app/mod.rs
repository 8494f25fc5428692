// Application layer - Use case interactors

pub mod batch_walker;
pub mod container;
pub mod convert_interactor;

// Re-export interactors
pub use batch_walker::{BatchPlan, BatchWalker, FilePlan, WalkOptions};
pub use container::{AppContainer, DefaultAppContainer};
pub use convert_interactor::ConvertInteractor;
