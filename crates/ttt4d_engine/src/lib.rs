pub mod ai;
pub mod evaluation;
pub mod position;
pub mod protocol;
pub mod search;
pub mod worker;

pub use ai::{Difficulty, TesseractAI};
pub use evaluation::evaluate_position;
pub use position::SearchPosition;
pub use protocol::{run_ai, ProtocolError, SearchRequest, SearchResponse};
pub use search::{choose_move, search_best_move, SearchResult};
pub use worker::SearchWorker;
