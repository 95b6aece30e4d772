mod project;

pub use project::ProjectServiceImpl;
