//! # Suite Normalizer Module / 套件规范化模块
//!
//! Repairs the suite list of a single run before it is aggregated.
//!
//! The upstream reporter emits a `describe` block that only contains nested blocks as an
//! empty suite, immediately followed by the nested suite that holds the real tests.
//! [`EmptyParentMerge`] folds such pairs into one suite named `"{parent} - {child}"` and
//! drops any suite that is still empty afterwards.
//!
//! Only a suite with an explicit empty `tests` array can be a parent. A suite whose
//! source had no `tests` field at all is dropped and leaves the next suite alone.
//!
//! The merge looks exactly one position ahead and never chains: for
//! `[A(empty), B(empty), C(tests)]` the result is `[B - C]` and `A` is dropped.
//!
//! 在聚合之前修复单次运行的套件列表。
//! 上游报告器会把只包含嵌套块的 `describe` 块输出为一个空套件，紧随其后的是包含真实测试的嵌套套件。
//! [`EmptyParentMerge`] 将这样的成对套件合并为一个名为 `"{parent} - {child}"` 的套件，
//! 并丢弃之后仍为空的套件。合并只向前看一个位置，且从不链式合并。

use crate::core::models::Suite;

/// Result of normalizing one run's suites.
/// 规范化单次运行套件的结果。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSuites {
    /// Suites that survived, each with at least one test. / 保留下来的套件，每个至少包含一个测试。
    pub suites: Vec<Suite>,
    /// Names of empty suites that could not be merged and were dropped.
    /// 无法合并而被丢弃的空套件名称。
    pub dropped: Vec<String>,
}

/// A repair applied to one run's suite sequence.
///
/// Implementations build new `Suite` values and leave their input untouched, so the
/// raw tree stays available for diagnostics.
///
/// 应用于单次运行套件序列的修复。实现会构造新的 `Suite` 值而不修改输入。
pub trait SuiteTransform {
    fn apply(&self, suites: &[Suite]) -> NormalizedSuites;
}

/// Merges an empty parent suite into the populated suite that directly follows it.
/// 将空的父套件合并到紧随其后的非空套件中。
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyParentMerge;

impl SuiteTransform for EmptyParentMerge {
    fn apply(&self, suites: &[Suite]) -> NormalizedSuites {
        let mut out = NormalizedSuites::default();
        let mut i = 0;

        while i < suites.len() {
            let suite = &suites[i];

            if suite.is_empty_parent() {
                match suites.get(i + 1) {
                    Some(child) if !child.is_empty() => {
                        out.suites.push(merge(suite, child));
                        // The child is consumed here and must not be emitted again.
                        i += 2;
                    }
                    _ => {
                        out.dropped.push(suite.name.clone());
                        i += 1;
                    }
                }
            } else if suite.is_empty() {
                out.dropped.push(suite.name.clone());
                i += 1;
            } else {
                out.suites.push(suite.clone());
                i += 1;
            }
        }

        out
    }
}

fn merge(parent: &Suite, child: &Suite) -> Suite {
    Suite {
        name: format!("{} - {}", parent.name, child.name),
        ..child.clone()
    }
}

/// Normalizes `suites` with the default [`EmptyParentMerge`] transform.
/// 使用默认的 [`EmptyParentMerge`] 转换规范化 `suites`。
pub fn normalize_suites(suites: &[Suite]) -> NormalizedSuites {
    EmptyParentMerge.apply(suites)
}
