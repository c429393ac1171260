mod post;

pub use post::{Post, PostRow, PostUpdate};
