use crate::types::{TeacherIndexKey, TeacherRow};
use log::debug;
use std::collections::HashMap;

/// Lookup from (subject code, grade-level, class) to the responsible teacher.
///
/// Group is deliberately left out of the key. When several teacher rows share
/// a key, the last one read wins.
#[derive(Debug, Default)]
pub struct TeacherIndex {
    by_key: HashMap<TeacherIndexKey, TeacherRow>,
}

impl TeacherIndex {
    pub fn build(teachers: &[TeacherRow]) -> Self {
        let mut by_key = HashMap::with_capacity(teachers.len());
        for teacher in teachers {
            if let Some(previous) = by_key.insert(teacher.index_key(), teacher.clone()) {
                debug!(
                    "Teacher key {} registered twice: {} replaces {}",
                    teacher.index_key(),
                    teacher.teacher_name,
                    previous.teacher_name
                );
            }
        }
        Self { by_key }
    }

    pub fn get(&self, key: &TeacherIndexKey) -> Option<&TeacherRow> {
        self.by_key.get(key)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}
