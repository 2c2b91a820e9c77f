//! Stat containers: values, tables of base values, and stat definitions
//! that compute a value through a pluggable function.
mod function;
mod table;
mod value;

pub use function::BaseValueStat;
pub use function::ConstantStat;
pub use function::EmptyContext;
pub use function::ScaledStat;
pub use function::Stat;
pub use function::StatFunction;
pub use function::StatFunctionContext;
pub use function::TableStat;
pub use table::StatId;
pub use table::StatTable;
pub use table::StatTableEntry;
pub use value::StatValue;
