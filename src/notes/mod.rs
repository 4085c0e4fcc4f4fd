pub mod aggregator;
pub mod github;
pub mod local_store;
pub mod note;

pub use aggregator::NoteAggregator;
pub use github::GitHubStore;
pub use local_store::LocalNoteStore;
pub use note::Note;
