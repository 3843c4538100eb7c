//! mscc-ir — quadruple intermediate-code generation and peephole optimization.

mod error;
mod generator;
mod notes;
mod operand;
mod optimize;
mod quad;

pub use error::{GeneratorError, OptimizerError};
pub use generator::Generator;
pub use notes::FrequencyTable;
pub use operand::Operand;
pub use optimize::Optimizer;
pub use quad::{Op, Quad};

use mscc_ast::Program;
use mscc_util::Interner;

/// Lower `program` to quadruples and run the peephole optimizer over them.
pub fn generate(program: &Program, interner: &Interner) -> Result<Vec<Quad>, GeneratorError> {
    Generator::generate(program, interner)
}

/// Run both optimizer passes (constant folding, then dead-jump elimination)
/// over a quadruple list.
pub fn optimize(quads: Vec<Quad>) -> Result<Vec<Quad>, OptimizerError> {
    Optimizer::optimize(quads)
}
