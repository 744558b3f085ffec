// Web-mined career candidates.
// Live search results are fetched, reduced to structured fields, and ranked
// by a deterministic keyword-overlap score. Individual page failures are
// skipped; they never abort the overall ranking.

pub mod handlers;
pub mod html;
pub mod ports;
pub mod ranker;
