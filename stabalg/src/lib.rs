//! Stabilizer tableaux and the GF(2) routines that update them: symplectic
//! canonicalization, projection onto Pauli eigenspaces over four tableau
//! flavors, partial trace, and qubit reset.
//!
//! ```
//! use stabalg::{Project, Stabilizer};
//!
//! let mut state: Stabilizer = "XXXX ZZII IZZI IIZZ".parse().unwrap();
//! let measurement = "ZIII".parse().unwrap();
//! let projection = state.project(&measurement).unwrap();
//! assert_eq!(projection.anticommuting, Some(0));
//! assert_eq!(projection.phase, None);
//! ```

pub mod tableau;
pub use tableau::Tableau;

pub mod structures;
pub use structures::{Destabilizer, MixedDestabilizer, MixedStabilizer, Stabilizer};

mod canonicalization;

pub mod projection;
pub use projection::{Project, Projection, ProjectionOptions, RowIndices};

mod trace;

mod errors;
pub use errors::TableauError;
