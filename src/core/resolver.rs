//! Name resolution ladder.
//!
//! Tried in order, first success wins:
//! exact -> alias -> normalized-exact -> substring -> token overlap.
//! Entries are always scanned in source order, so the same input against the
//! same data resolves to the same entry.

use crate::core::aliases::AliasTable;
use crate::core::indexed::{IndexedData, Searchable};
use crate::core::normalize::{normalize_name, significant_tokens};
use std::collections::HashSet;
use std::sync::Arc;

const MAX_ALIAS_HOPS: usize = 4;

/// 模糊比對（子字串、詞彙重疊）所需的最短正規化長度
pub const MIN_FUZZY_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStep {
    Exact,
    Alias,
    Normalized,
    Substring,
    TokenOverlap,
}

#[derive(Debug, Clone)]
pub struct Resolution<T> {
    pub entry: Arc<T>,
    pub step: MatchStep,
}

pub struct NameResolver<'a> {
    aliases: &'a AliasTable,
    suffixes: &'a [&'static str],
}

impl<'a> NameResolver<'a> {
    pub fn new(aliases: &'a AliasTable, suffixes: &'a [&'static str]) -> Self {
        Self { aliases, suffixes }
    }

    pub fn resolve_entry<T: Searchable>(&self, data: &IndexedData<T>, raw: &str) -> Option<Arc<T>> {
        self.resolve(data, raw).map(|resolution| resolution.entry)
    }

    pub fn resolve<T: Searchable>(&self, data: &IndexedData<T>, raw: &str) -> Option<Resolution<T>> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || data.is_empty() {
            return None;
        }

        // 1. 完全比對
        if let Some(position) = data.exact_position(&trimmed.to_lowercase()) {
            return hit(data, position, MatchStep::Exact);
        }

        // 2. 別名表（也試去掉類別字尾的版本）
        let stripped = self.strip_category_suffix(trimmed);
        let mut mapped = None;
        for candidate in std::iter::once(trimmed).chain(stripped.as_deref()) {
            match self.follow_aliases(data, candidate) {
                AliasOutcome::Found(position) => return hit(data, position, MatchStep::Alias),
                AliasOutcome::Mapped(value) => {
                    mapped = Some(value);
                    break;
                }
                AliasOutcome::Unmapped => {}
            }
        }

        // 3-5 依序使用：別名結果、去字尾版本、原始輸入
        let mut candidates: Vec<String> = Vec::with_capacity(3);
        for candidate in [mapped.as_deref(), stripped.as_deref(), Some(trimmed)]
            .into_iter()
            .flatten()
        {
            let normalized = normalize_name(candidate);
            if !normalized.is_empty() && !candidates.contains(&normalized) {
                candidates.push(normalized);
            }
        }

        // 3. 正規化後完全比對
        for normalized in &candidates {
            if let Some(position) = data.normalized_position(normalized) {
                return hit(data, position, MatchStep::Normalized);
            }
        }

        candidates.retain(|normalized| normalized.chars().count() >= MIN_FUZZY_LEN);

        // 4. 子字串（雙向）
        for normalized in &candidates {
            let found = data.keyed().find(|(_, keys)| {
                keys.normalized.iter().any(|name| {
                    name.contains(normalized.as_str())
                        || (name.chars().count() >= MIN_FUZZY_LEN
                            && normalized.contains(name.as_str()))
                })
            });
            if let Some((position, _)) = found {
                return hit(data, position, MatchStep::Substring);
            }
        }

        // 5. 詞彙重疊（只看長度 > 2 的詞）
        for normalized in &candidates {
            let search_tokens = significant_tokens(normalized);
            if search_tokens.is_empty() {
                continue;
            }
            let found = data.keyed().find(|(_, keys)| {
                search_tokens.iter().any(|search| {
                    keys.tokens
                        .iter()
                        .any(|token| token.contains(search.as_str()) || search.contains(token.as_str()))
                })
            });
            if let Some((position, _)) = found {
                return hit(data, position, MatchStep::TokenOverlap);
            }
        }

        tracing::debug!("❌ No match for '{}'", trimmed);
        None
    }

    fn follow_aliases<T>(&self, data: &IndexedData<T>, start: &str) -> AliasOutcome {
        let mut visited = HashSet::new();
        visited.insert(start.to_lowercase());
        let mut current = start.to_string();
        let mut last_mapped = None;

        for _ in 0..MAX_ALIAS_HOPS {
            let Some(next) = self.aliases.lookup(&current) else {
                break;
            };
            if !visited.insert(next.to_lowercase()) {
                break;
            }
            tracing::debug!("🗺️ Alias '{}' -> '{}'", current, next);
            if let Some(position) = data.exact_position(&next.to_lowercase()) {
                return AliasOutcome::Found(position);
            }
            current = next.to_string();
            last_mapped = Some(current.clone());
        }

        match last_mapped {
            Some(value) => AliasOutcome::Mapped(value),
            None => AliasOutcome::Unmapped,
        }
    }

    fn strip_category_suffix(&self, trimmed: &str) -> Option<String> {
        let (head, last) = trimmed.rsplit_once(char::is_whitespace)?;
        let last = normalize_name(last);
        let head = head.trim();
        if head.is_empty() || !self.suffixes.iter().any(|suffix| *suffix == last) {
            return None;
        }
        Some(head.to_string())
    }
}

enum AliasOutcome {
    Found(usize),
    Mapped(String),
    Unmapped,
}

fn hit<T>(data: &IndexedData<T>, position: usize, step: MatchStep) -> Option<Resolution<T>> {
    let entry = data.get(position)?.clone();
    tracing::debug!("✅ Matched entry #{} via {:?}", position, step);
    Some(Resolution { entry, step })
}
