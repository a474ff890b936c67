//! Section parser
//!
//! A report is split at every `Element type:` header. Every line, header
//! included, is kept (trimmed) under the most recent section name; lines
//! before the first header land under the empty name. Blank lines at either
//! end of the text are ignored.

use std::collections::HashMap;

use super::grammar;
use crate::error::ParseError;

/// A parsed `sg_ses` report: section name -> lines, in order of appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawReport {
    sections: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RawReport {
    /// Split report text into sections
    pub fn parse(text: &str) -> Self {
        let mut report = Self::default();
        let mut current = String::new();

        let lines = text
            .trim_end()
            .lines()
            .skip_while(|line| line.trim().is_empty());
        for line in lines {
            if let Some(name) = grammar::section_header(line) {
                current = name.to_string();
            }
            report.push(&current, line.trim());
        }

        report
    }

    fn push(&mut self, section: &str, line: &str) {
        let slot = match self.index.get(section) {
            Some(&slot) => slot,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.index.insert(section.to_string(), self.sections.len() - 1);
                self.sections.len() - 1
            }
        };
        self.sections[slot].1.push(line.to_string());
    }

    /// Lines of a section, if present
    pub fn section(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&slot| self.sections[slot].1.as_slice())
    }

    /// Lines of a section that must be present
    pub fn require(&self, name: &str) -> Result<&[String], ParseError> {
        self.section(name)
            .ok_or_else(|| ParseError::MissingSection(name.to_string()))
    }

    /// Section names in order of first appearance
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    /// Number of sections, preamble included
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
