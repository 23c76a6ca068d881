pub(crate) mod content;
pub(crate) mod effects;
pub(crate) mod node;
