#![allow(dead_code, unused_imports)]

pub(crate) mod test_context;

pub(crate) use test_context::{TestContext, USER_ID, quiz_reply, roadmap_reply, sample_form};
