use super::models::Employee;

/// Returns the records matching `query`, in their original order.
///
/// A record matches when the query is empty or, ignoring case, appears in
/// its first name, last name, email or position.
///
/// # Examples
///
/// ```
/// use empdir::domain::filter_employees;
///
/// assert!(filter_employees(&[], "anything").is_empty());
/// ```
pub fn filter_employees<'a>(records: &'a [Employee], query: &str) -> Vec<&'a Employee> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();
    records.iter().filter(|e| matches(e, &needle)).collect()
}

fn matches(employee: &Employee, needle: &str) -> bool {
    [
        &employee.first_name,
        &employee.last_name,
        &employee.email,
        &employee.position,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
