//! Report generation
//!
//! Consumes the registry at the end of a run and writes a deterministic,
//! human-readable report: per-function blocks ranked by arithmetic
//! activity, then a global summary. Runs once, off the hot path.

use crate::classify::ArithClass;
use crate::registry::{FunctionRecord, Registry};
use std::io::{self, Write};

const RULE_HEAVY: &str = "========================================";
const RULE_LIGHT: &str = "----------------------------------------";

/// Write the full profile report to a sink.
///
/// Functions are ordered by total count descending, with address ascending
/// as the tie-break so the output is reproducible. Functions that never
/// executed an arithmetic instruction are skipped.
pub fn write_report<W: Write>(registry: &Registry, out: &mut W) -> io::Result<()> {
    writeln!(out, "{RULE_HEAVY}")?;
    writeln!(out, "  ARITHMETIC INSTRUCTION PROFILE")?;
    writeln!(out, "{RULE_HEAVY}")?;
    writeln!(out)?;

    let mut sorted: Vec<&FunctionRecord> = registry.records().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total).then(a.address.cmp(&b.address)));

    let mut grand_total: u64 = 0;
    let mut active_functions: u64 = 0;

    for record in &sorted {
        if record.total == 0 {
            continue;
        }
        grand_total += record.total;
        active_functions += 1;

        writeln!(out, "{RULE_LIGHT}")?;
        writeln!(out, "Function: {}", record.name)?;
        writeln!(out, "Address: 0x{:x}", record.address)?;
        writeln!(out, "Total arithmetic instructions: {}", record.total)?;
        if record.possibly_inlined {
            writeln!(out, "NOTE: this function may also execute inlined elsewhere")?;
        }
        writeln!(out)?;
        writeln!(out, "Breakdown by class:")?;
        write_breakdown(out, |class| record.counts.get(&class).copied().unwrap_or(0), record.total)?;
        writeln!(out)?;
    }

    writeln!(out, "{RULE_HEAVY}")?;
    writeln!(out, "GLOBAL SUMMARY")?;
    writeln!(out, "{RULE_HEAVY}")?;
    writeln!(out, "Functions with arithmetic activity: {active_functions}")?;
    writeln!(out, "Total arithmetic instructions: {grand_total}")?;
    writeln!(out)?;

    if grand_total > 0 {
        let mut global = std::collections::HashMap::new();
        for record in &sorted {
            for (class, count) in &record.counts {
                *global.entry(*class).or_insert(0u64) += count;
            }
        }
        writeln!(out, "Global distribution by class:")?;
        write_breakdown(out, |class| global.get(&class).copied().unwrap_or(0), grand_total)?;
    }

    Ok(())
}

/// Write one class/count/percentage table. Zero-count classes are
/// omitted; `total` is known nonzero for every emitted row's divisor.
fn write_breakdown<W, F>(out: &mut W, count_of: F, total: u64) -> io::Result<()>
where
    W: Write,
    F: Fn(ArithClass) -> u64,
{
    writeln!(out, "{:>20}{:>15}{:>15}", "Class", "Count", "Percentage")?;
    writeln!(out, "{}", "-".repeat(50))?;

    for class in ArithClass::ALL {
        let count = count_of(class);
        if count == 0 {
            continue;
        }
        let percentage = if total > 0 {
            (count as f64 * 100.0) / total as f64
        } else {
            0.0
        };
        writeln!(out, "{:>20}{:>15}{:>14.2}%", class.label(), count, percentage)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(registry: &Registry) -> String {
        let mut buf = Vec::new();
        write_report(registry, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_registry_reports_zero_summary() {
        let registry = Registry::new();
        let report = render(&registry);
        assert!(report.contains("GLOBAL SUMMARY"));
        assert!(report.contains("Functions with arithmetic activity: 0"));
        assert!(report.contains("Total arithmetic instructions: 0"));
        // No breakdown when there is nothing to divide by
        assert!(!report.contains("Global distribution by class:"));
    }

    #[test]
    fn test_idle_functions_are_skipped_but_not_errors() {
        let mut registry = Registry::new();
        registry.register(0x1000, "never_hit");
        registry.register(0x2000, "busy");
        registry.record_arithmetic(0x2000, ArithClass::Add);

        let report = render(&registry);
        assert!(!report.contains("never_hit"));
        assert!(report.contains("Function: busy"));
        assert!(report.contains("Functions with arithmetic activity: 1"));
    }

    #[test]
    fn test_sorted_by_total_descending() {
        let mut registry = Registry::new();
        registry.register(0x1000, "f1");
        registry.register(0x2000, "f2");
        registry.register(0x3000, "f3");
        for _ in 0..10 {
            registry.record_arithmetic(0x1000, ArithClass::Add);
        }
        for _ in 0..30 {
            registry.record_arithmetic(0x2000, ArithClass::Add);
        }
        for _ in 0..5 {
            registry.record_arithmetic(0x3000, ArithClass::Add);
        }

        let report = render(&registry);
        let p1 = report.find("Function: f1").unwrap();
        let p2 = report.find("Function: f2").unwrap();
        let p3 = report.find("Function: f3").unwrap();
        assert!(p2 < p1, "f2 (30) must precede f1 (10)");
        assert!(p1 < p3, "f1 (10) must precede f3 (5)");
    }

    #[test]
    fn test_ties_break_by_address_ascending() {
        let mut registry = Registry::new();
        registry.register(0x9000, "high_addr");
        registry.register(0x1000, "low_addr");
        registry.record_arithmetic(0x9000, ArithClass::Sub);
        registry.record_arithmetic(0x1000, ArithClass::Sub);

        let report = render(&registry);
        let low = report.find("Function: low_addr").unwrap();
        let high = report.find("Function: high_addr").unwrap();
        assert!(low < high);
    }

    #[test]
    fn test_per_function_block_contents() {
        let mut registry = Registry::new();
        registry.register(0xdeadbeef, "calculate");
        for _ in 0..3 {
            registry.record_arithmetic(0xdeadbeef, ArithClass::Add);
        }
        registry.record_arithmetic(0xdeadbeef, ArithClass::SseMul);

        let report = render(&registry);
        assert!(report.contains("Function: calculate"));
        assert!(report.contains("Address: 0xdeadbeef"));
        assert!(report.contains("Total arithmetic instructions: 4"));
        assert!(report.contains("ADD"));
        assert!(report.contains("SSE_MUL"));
        assert!(report.contains("75.00%"));
        assert!(report.contains("25.00%"));
    }

    #[test]
    fn test_inline_hint_note() {
        let mut registry = Registry::new();
        registry.register(0x1000, "inline_multiply");
        registry.record_arithmetic(0x1000, ArithClass::Imul);
        registry.mark_possibly_inlined(0x1000);

        let report = render(&registry);
        assert!(report.contains("may also execute inlined elsewhere"));
    }

    #[test]
    fn test_zero_count_classes_omitted() {
        let mut registry = Registry::new();
        registry.register(0x1000, "f");
        registry.record_arithmetic(0x1000, ArithClass::FpuDiv);

        let report = render(&registry);
        assert!(report.contains("FPU_DIV"));
        assert!(!report.contains("SIMD_ADD"));
        assert!(!report.contains("UNKNOWN"));
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let mut registry = Registry::new();
        registry.register(0x1000, "mixed");
        // 3 classes, 1/3 each: rows print 33.33 three times
        for class in [ArithClass::Add, ArithClass::Sub, ArithClass::Mul] {
            registry.record_arithmetic(0x1000, class);
        }

        let report = render(&registry);
        let sum: f64 = report
            .lines()
            .filter(|l| l.trim_end().ends_with('%'))
            .map(|l| {
                let pct = l.trim_end().trim_end_matches('%');
                pct.split_whitespace().last().unwrap().parse::<f64>().unwrap()
            })
            .sum();
        // Function table + identical global table, each ~100.00
        assert!((sum - 200.0).abs() < 0.1, "sum was {sum}");
    }

    #[test]
    fn test_global_distribution_spans_all_functions() {
        let mut registry = Registry::new();
        registry.register(0x1000, "a");
        registry.register(0x2000, "b");
        registry.record_arithmetic(0x1000, ArithClass::Add);
        registry.record_arithmetic(0x2000, ArithClass::Add);
        registry.record_arithmetic(0x2000, ArithClass::AvxMul);

        let report = render(&registry);
        assert!(report.contains("Total arithmetic instructions: 3"));
        let global = &report[report.find("Global distribution").unwrap()..];
        assert!(global.contains("66.67%"));
        assert!(global.contains("33.33%"));
    }

    #[test]
    fn test_report_is_reproducible() {
        let mut registry = Registry::new();
        for i in 0..20u64 {
            registry.register(0x1000 + i * 0x10, &format!("fn{i}"));
            for _ in 0..=(i % 5) {
                registry.record_arithmetic(0x1000 + i * 0x10, ArithClass::Add);
            }
        }
        assert_eq!(render(&registry), render(&registry));
    }
}
