//! Ordered plausibility rules
//!
//! Caps and floors that keep cross-field combinations believable are listed
//! as `(predicate, correction)` pairs and executed strictly in list order.
//! Later rules may override earlier ones, so the order is part of the
//! contract. Each predicate also checks that its correction would change
//! something, which keeps the list of fired rules meaningful for audit.

/// One named correction.
pub struct Rule<T: 'static, C: 'static> {
    pub name: &'static str,
    pub applies: fn(&T, &C) -> bool,
    pub apply: fn(&mut T, &C),
}

/// A fixed, ordered list of rules over a target `T` with read-only inputs `C`.
pub struct ConstraintPipeline<T: 'static, C: 'static> {
    rules: &'static [Rule<T, C>],
}

impl<T: 'static, C: 'static> ConstraintPipeline<T, C> {
    pub const fn new(rules: &'static [Rule<T, C>]) -> Self {
        Self { rules }
    }

    /// Applies every rule whose predicate holds at the moment it is reached.
    ///
    /// Returns the names of the rules that fired, in order.
    pub fn run(&self, target: &mut T, ctx: &C) -> Vec<&'static str> {
        let mut fired = Vec::new();
        for rule in self.rules {
            if (rule.applies)(target, ctx) {
                (rule.apply)(target, ctx);
                fired.push(rule.name);
            }
        }
        fired
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|r| r.name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Limits {
        ceiling: i32,
    }

    static PIPELINE: ConstraintPipeline<i32, Limits> = ConstraintPipeline::new(&[
        Rule {
            name: "ceiling",
            applies: |v, l| *v > l.ceiling,
            apply: |v, l| *v = l.ceiling,
        },
        Rule {
            name: "halve_large",
            applies: |v, _| *v > 50,
            apply: |v, _| *v /= 2,
        },
    ]);

    #[test]
    fn test_rules_run_in_order() {
        let mut value = 500;
        let fired = PIPELINE.run(&mut value, &Limits { ceiling: 80 });
        assert_eq!(value, 40);
        assert_eq!(fired, vec!["ceiling", "halve_large"]);
    }

    #[test]
    fn test_idle_rules_do_not_report() {
        let mut value = 10;
        let fired = PIPELINE.run(&mut value, &Limits { ceiling: 80 });
        assert_eq!(value, 10);
        assert!(fired.is_empty());
        assert_eq!(PIPELINE.names().collect::<Vec<_>>(), vec!["ceiling", "halve_large"]);
        assert_eq!(PIPELINE.len(), 2);
    }
}
