//! In-memory record store.
//!
//! Stands in for the relational store behind the API: users unique by
//! name, companies deduplicated by url at import, rules deduplicated at
//! creation time (same user + input + feature_name is a silent skip),
//! and an append-only processed-feature log.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use firmo_core::{Company, ProcessedFeature, User};
use firmo_rules::Rule;

#[derive(Default)]
pub struct Database {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    companies: HashMap<Uuid, Company>,
    /// Rules in creation order.
    rules: Vec<Rule>,
    features: Vec<ProcessedFeature>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("store lock poisoned")
    }

    // ── Users ───────────────────────────────────────────────────────

    pub fn find_user(&self, user_name: &str) -> Option<User> {
        self.read()
            .users
            .values()
            .find(|u| u.user_name == user_name)
            .cloned()
    }

    /// Create the user if absent; either way return the stored record.
    pub fn find_or_create_user(&self, user_name: &str) -> User {
        if let Some(user) = self.find_user(user_name) {
            return user;
        }
        let user = User::new(user_name);
        self.write().users.insert(user.id, user.clone());
        user
    }

    pub fn user_count(&self) -> usize {
        self.read().users.len()
    }

    // ── Companies ───────────────────────────────────────────────────

    /// Insert unless a company with the same url exists. Returns whether
    /// the company was stored.
    pub fn insert_company(&self, company: Company) -> bool {
        let mut inner = self.write();
        if inner.companies.values().any(|c| c.url == company.url) {
            return false;
        }
        inner.companies.insert(company.id, company);
        true
    }

    pub fn companies_by_urls(&self, urls: &[String]) -> Vec<Company> {
        let mut companies: Vec<Company> = self
            .read()
            .companies
            .values()
            .filter(|c| urls.contains(&c.url))
            .cloned()
            .collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        companies
    }

    pub fn all_companies(&self) -> Vec<Company> {
        let mut companies: Vec<Company> = self.read().companies.values().cloned().collect();
        companies.sort_by(|a, b| a.name.cmp(&b.name));
        companies
    }

    pub fn company_count(&self) -> usize {
        self.read().companies.len()
    }

    pub fn mark_processed(&self, company_id: Uuid, at: DateTime<Utc>) {
        if let Some(company) = self.write().companies.get_mut(&company_id) {
            company.last_processed_at = Some(at);
        }
    }

    // ── Rules ───────────────────────────────────────────────────────

    /// Creation-time dedup probe: does this user already have a rule
    /// with the same input and feature name?
    pub fn rule_exists(&self, user_id: Uuid, input: &str, feature_name: &str) -> bool {
        self.read().rules.iter().any(|r| {
            r.user_id == user_id && r.input == input && r.feature_name == feature_name
        })
    }

    pub fn insert_rule(&self, rule: Rule) {
        self.write().rules.push(rule);
    }

    /// A user's rules in creation order.
    pub fn rules_for_user(&self, user_id: Uuid) -> Vec<Rule> {
        self.read()
            .rules
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    pub fn rule_count(&self) -> usize {
        self.read().rules.len()
    }

    // ── Processed features ──────────────────────────────────────────

    pub fn record_feature(&self, feature: ProcessedFeature) {
        self.write().features.push(feature);
    }

    pub fn features_for_company(&self, company_id: Uuid) -> Vec<ProcessedFeature> {
        self.read()
            .features
            .iter()
            .filter(|f| f.company_id == company_id)
            .cloned()
            .collect()
    }
}

// ── Tests ───────────────────────────────────────────────────────────
