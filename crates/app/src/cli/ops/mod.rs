pub mod keygen;
pub mod open;
pub mod seal;
pub mod version;

pub use keygen::Keygen;
pub use open::Open;
pub use seal::Seal;
pub use version::Version;
