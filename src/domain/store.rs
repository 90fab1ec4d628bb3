//! In-memory, insertion-ordered collection of employee records.

use super::models::{Employee, EmployeeId, NewEmployee};

/// Ordered employee collection. Ids are assigned here and nowhere else.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use empdir::domain::{Department, EmployeeStore, NewEmployee};
///
/// let mut store = EmployeeStore::default();
/// let ann = store.add(NewEmployee {
///     first_name: "Ann".into(),
///     last_name: "Lee".into(),
///     email: "a@x.com".into(),
///     phone: "1".into(),
///     position: "Dev".into(),
///     department: Department::Engineering,
///     hire_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     salary: 50_000,
/// });
/// assert_eq!(store.list().len(), 1);
/// store.delete(&ann.id);
/// assert!(store.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
}

impl EmployeeStore {
    /// Builds a store from seed records, giving each a fresh id.
    pub fn from_seed(seed: impl IntoIterator<Item = NewEmployee>) -> Self {
        let mut store = Self::default();
        for draft in seed {
            store.add(draft);
        }
        store
    }

    pub fn add(&mut self, draft: NewEmployee) -> Employee {
        let id = self.fresh_id();
        let employee = draft.with_id(id);
        self.employees.push(employee.clone());
        employee
    }

    /// Replaces the record with the same id in place.
    ///
    /// Returns `false` and changes nothing when no record matches.
    pub fn update(&mut self, employee: Employee) -> bool {
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(slot) => {
                *slot = employee;
                true
            }
            None => false,
        }
    }

    pub fn delete(&mut self, id: &EmployeeId) -> Option<Employee> {
        let index = self.employees.iter().position(|e| &e.id == id)?;
        Some(self.employees.remove(index))
    }

    pub fn list(&self) -> &[Employee] {
        &self.employees
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    fn fresh_id(&self) -> EmployeeId {
        loop {
            let id = EmployeeId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn draft(first: &str, last: &str) -> NewEmployee {
        NewEmployee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "555-0100".to_string(),
            position: "Engineer".to_string(),
            department: Department::Engineering,
            hire_date: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            salary: 60_000,
        }
    }

    fn seeded() -> EmployeeStore {
        EmployeeStore::from_seed(vec![draft("Ann", "Lee"), draft("Bob", "Ray"), draft("Cy", "Oak")])
    }

    #[test]
    fn test_add_appends_with_unique_id() {
        let mut store = seeded();
        let existing: HashSet<EmployeeId> = store.list().iter().map(|e| e.id.clone()).collect();
        assert_eq!(existing.len(), 3);

        let added = store.add(draft("Dee", "Fox"));
        assert!(!existing.contains(&added.id));
        assert_eq!(store.len(), 4);
        assert_eq!(store.list().last(), Some(&added));
    }

    #[test]
    fn test_many_adds_never_collide() {
        let mut store = EmployeeStore::default();
        for i in 0..200 {
            store.add(draft(&format!("N{i}"), "X"));
        }
        let ids: HashSet<&EmployeeId> = store.list().iter().map(|e| &e.id).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = seeded();
        let before = store.list().to_vec();

        let mut changed = before[1].clone();
        changed.position = "Manager".to_string();
        changed.salary = 90_000;
        assert!(store.update(changed.clone()));

        let after = store.list();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], changed);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = seeded();
        let before = store.list().to_vec();

        let stray = draft("Zed", "Q").with_id(EmployeeId::from("missing"));
        assert!(!store.update(stray));
        assert_eq!(store.list(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_at_most_one() {
        let mut store = seeded();
        let target = store.list()[1].clone();

        assert_eq!(store.delete(&target.id), Some(target.clone()));
        assert_eq!(store.len(), 2);
        assert!(store.get(&target.id).is_none());

        assert_eq!(store.delete(&target.id), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_order_preserved_after_delete() {
        let mut store = seeded();
        let first = store.list()[0].id.clone();
        store.delete(&first);
        let names: Vec<&str> = store.list().iter().map(|e| e.first_name.as_str()).collect();
        assert_eq!(names, vec!["Bob", "Cy"]);
    }
}
