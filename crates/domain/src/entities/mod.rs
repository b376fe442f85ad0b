pub mod pool;
pub mod project;

pub use pool::Pool;
pub use project::Project;
