#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullEntry {
    pub number: u64,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub label: String,
    pub entries: Vec<PullEntry>,
}

impl Section {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Release-note buckets in print order. Entries keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: labels
                .into_iter()
                .map(|label| Section {
                    label: label.into(),
                    entries: Vec::new(),
                })
                .collect(),
        }
    }

    /// Files a pull request under `label`. A number already present in that
    /// bucket keeps its position and takes the new summary. Unknown labels
    /// get a new bucket at the end.
    pub fn insert(&mut self, label: &str, number: u64, summary: String) {
        let index = match self.sections.iter().position(|s| s.label == label) {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    label: label.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        };

        let entries = &mut self.sections[index].entries;
        match entries.iter_mut().find(|e| e.number == number) {
            Some(existing) => existing.summary = summary,
            None => entries.push(PullEntry { number, summary }),
        }
    }

    pub fn get(&self, label: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.label == label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    /// Number of pull requests across all buckets.
    pub fn total(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}
