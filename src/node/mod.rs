//! Node execution
//!
//! `GetResponseNode` resolves the operation for each input item, builds the
//! request, performs it (paginating listings) and shapes the response into
//! output items. It also serves the dropdown option loaders.

mod executor;
mod options;

pub use executor::GetResponseNode;
pub use options::NodeOption;
