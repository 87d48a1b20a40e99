//! Data shapes exchanged with the backend and kept in the local store.

mod lexicon;
mod post;
mod user;
mod word;

pub use lexicon::{
    CurrentLexicon, Lexicon, LexiconInfo, LexiconResponse, LexiconStatus, Page, Pageable,
    SystemWordbook,
};
pub(crate) use lexicon::SelectLexiconRequest;
pub use post::{Comment, CommentNode, CommentThread, Post};
pub use user::{LearnSettings, UserInfo};
pub use word::{PartOfSpeech, Phonetic, Word};
