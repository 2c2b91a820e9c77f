use std::fmt::Debug;

use super::StatId;
use super::StatTable;
use super::StatValue;

/// Whatever a stat function may consult while evaluating, typically the
/// owner's stat table.
pub trait StatFunctionContext {
    fn stat_table(&self) -> Option<&StatTable> {
        None
    }
}

/// A context that offers nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl StatFunctionContext for EmptyContext {}

impl StatFunctionContext for StatTable {
    fn stat_table(&self) -> Option<&StatTable> {
        Some(self)
    }
}

/// How a stat turns a base value into its current value.
pub trait StatFunction: Debug {
    fn evaluate(&self, base_value: i32, context: &dyn StatFunctionContext) -> StatValue;
}

/// Always the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantStat(pub StatValue);

impl StatFunction for ConstantStat {
    fn evaluate(&self, _base_value: i32, _context: &dyn StatFunctionContext) -> StatValue {
        self.0
    }
}

/// The base value, unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BaseValueStat;

impl StatFunction for BaseValueStat {
    fn evaluate(&self, base_value: i32, _context: &dyn StatFunctionContext) -> StatValue {
        StatValue::Int(base_value)
    }
}

/// base * factor, as a float.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledStat {
    pub factor: f32,
}

impl StatFunction for ScaledStat {
    fn evaluate(&self, base_value: i32, _context: &dyn StatFunctionContext) -> StatValue {
        StatValue::Float(base_value as f32 * self.factor)
    }
}

/// base plus another stat's value from the context table. Uses `fallback`
/// when the context has no table or the table lacks the stat.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStat {
    pub stat: StatId,
    pub fallback: StatValue,
}

impl StatFunction for TableStat {
    fn evaluate(&self, base_value: i32, context: &dyn StatFunctionContext) -> StatValue {
        match context.stat_table().and_then(|table| table.try_get(&self.stat)) {
            Some(value) => StatValue::Int(base_value.saturating_add(value)),
            None => self.fallback,
        }
    }
}

/// A stat definition: a name for display and the function that computes it.
#[derive(Debug)]
pub struct Stat {
    id: StatId,
    display_name: String,
    function: Box<dyn StatFunction>,
}

impl Stat {
    pub fn new(id: StatId, display_name: impl Into<String>, function: Box<dyn StatFunction>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            function,
        }
    }

    pub fn id(&self) -> &StatId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn value(&self, base_value: i32, context: &dyn StatFunctionContext) -> StatValue {
        self.function.evaluate(base_value, context)
    }

    /// Evaluate every stat in `stats` against its base value in `bases`.
    /// Stats missing from `bases` evaluate with a base of 0.
    pub fn evaluate_all<'a>(
        stats: &'a [Stat],
        bases: &StatTable,
        context: &dyn StatFunctionContext,
    ) -> Vec<(&'a StatId, StatValue)> {
        stats
            .iter()
            .map(|stat| {
                let base = bases.try_get(stat.id()).unwrap_or_default();
                (stat.id(), stat.value(base, context))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::stat::StatTableEntry;

    fn bases() -> StatTable {
        StatTable::from_entries([
            StatTableEntry::new("strength".into(), 12),
            StatTableEntry::new("level".into(), 3),
        ])
    }

    #[test]
    fn constant_and_base() {
        let context = EmptyContext;
        assert_eq!(
            ConstantStat(StatValue::Float(1.5)).evaluate(99, &context),
            StatValue::Float(1.5)
        );
        assert_eq!(BaseValueStat.evaluate(7, &context), StatValue::Int(7));
        assert_eq!(
            ScaledStat { factor: 0.5 }.evaluate(7, &context),
            StatValue::Float(3.5)
        );
    }

    #[test]
    fn table_stat_reads_context() {
        let function = TableStat {
            stat: "level".into(),
            fallback: StatValue::None,
        };
        let table = bases();
        assert_eq!(function.evaluate(10, &table), StatValue::Int(13));
        assert_eq!(function.evaluate(10, &EmptyContext), StatValue::None);

        let missing = TableStat {
            stat: "luck".into(),
            fallback: StatValue::Int(0),
        };
        assert_eq!(missing.evaluate(10, &table), StatValue::Int(0));
    }

    #[test]
    fn stat_delegates_to_function() {
        let stat = Stat::new("attack".into(), "Attack", Box::new(ScaledStat { factor: 2.0 }));
        assert_eq!(stat.id().as_str(), "attack");
        assert_eq!(stat.display_name(), "Attack");
        assert_eq!(stat.value(4, &EmptyContext), StatValue::Float(8.0));
    }

    #[test]
    fn evaluate_all_uses_bases() {
        let stats = vec![
            Stat::new("strength".into(), "Strength", Box::new(BaseValueStat)),
            Stat::new(
                "power".into(),
                "Power",
                Box::new(TableStat {
                    stat: "strength".into(),
                    fallback: StatValue::None,
                }),
            ),
        ];
        let table = bases();
        let values = Stat::evaluate_all(&stats, &table, &table);
        assert_eq!(values[0], (&StatId::from("strength"), StatValue::Int(12)));
        // power has no base so it is strength + 0
        assert_eq!(values[1], (&StatId::from("power"), StatValue::Int(12)));
    }
}
