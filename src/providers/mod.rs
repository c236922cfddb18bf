pub mod frase;
pub mod pydolar;
pub mod util;

pub use frase::FraseProvider;
pub use pydolar::PyDolarProvider;
pub use util::HttpSettings;
