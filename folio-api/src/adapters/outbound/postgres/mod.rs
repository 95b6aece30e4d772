mod project;

pub use project::PostgresProjectRepository;
