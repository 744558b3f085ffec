// Profile analysis — turns an answer history into a free-text trait profile
// consumed verbatim by the recommendation stages.

pub mod profile;
pub mod prompts;
