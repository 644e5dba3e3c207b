//! Option sources.
//!
//! A question's options are either its own static `values` or a function of
//! another question's current answer. `subParams` on a `select_parent` and
//! `queryValues` on a dependent question are two views of the same thing:
//! the parent publishes a list under its own id, dependents read it back.

use std::collections::BTreeMap;

use faena_core::models::descriptor::Question;
use faena_core::models::option::FormValue;

/// Child option lists published by `select_parent` questions, keyed by parent id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DynamicOptions(BTreeMap<String, Vec<FormValue>>);

impl DynamicOptions {
    pub fn publish(&mut self, parent_id: &str, options: Vec<FormValue>) {
        self.0.insert(parent_id.to_string(), options);
    }

    /// Empty until the parent has a value.
    pub fn get(&self, parent_id: &str) -> &[FormValue] {
        self.0.get(parent_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSource<'a> {
    Static,
    DependsOn(&'a str),
}

impl<'a> OptionSource<'a> {
    /// `queryValues` wins over static values when both are present.
    pub fn of(question: &'a Question) -> Self {
        match question.depends_on() {
            Some(parent_id) => OptionSource::DependsOn(parent_id),
            None => OptionSource::Static,
        }
    }
}

/// The options `question` offers right now.
pub fn resolve<'s>(question: &'s Question, dynamic: &'s DynamicOptions) -> &'s [FormValue] {
    match OptionSource::of(question) {
        OptionSource::Static => &question.values,
        OptionSource::DependsOn(parent_id) => dynamic.get(parent_id),
    }
}
