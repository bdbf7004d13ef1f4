pub mod object_id;

pub use object_id::{ObjectId, UserId};
