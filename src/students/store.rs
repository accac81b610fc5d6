//! In-memory student storage.

use std::sync::{Mutex, MutexGuard, PoisonError};

use super::model::{NewStudent, Student};

/// Process-local student collection plus its id counter.
///
/// Every operation runs under one lock, so id allocation and the append that
/// follows it, as well as scan-then-mutate sequences, are atomic with
/// respect to each other. Records keep insertion order; ids start at 1, only
/// ever grow and are never handed out twice, even after a delete.
#[derive(Debug)]
pub struct StudentStore {
    roster: Mutex<Roster>,
}

#[derive(Debug)]
struct Roster {
    students: Vec<Student>,
    next_id: i64,
}

impl StudentStore {
    pub fn new() -> Self {
        Self { roster: Mutex::new(Roster { students: Vec::new(), next_id: 1 }) }
    }

    // A panic while holding the lock cannot leave the roster half-written:
    // every mutation is a single push, field assignment or remove.
    fn roster(&self) -> MutexGuard<'_, Roster> {
        self.roster.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Assigns the next id and appends the record.
    pub fn create(&self, new: NewStudent) -> Student {
        let mut roster = self.roster();
        let student = Student { id: roster.next_id, name: new.name, age: new.age };
        roster.next_id += 1;
        roster.students.push(student.clone());
        student
    }

    /// Snapshot of every record, in insertion order.
    pub fn list(&self) -> Vec<Student> {
        self.roster().students.clone()
    }

    pub fn get(&self, id: i64) -> Option<Student> {
        self.roster().students.iter().find(|s| s.id == id).cloned()
    }

    /// Replaces name and age in place. The id is untouched.
    pub fn update(&self, id: i64, new: NewStudent) -> Option<Student> {
        let mut roster = self.roster();
        let student = roster.students.iter_mut().find(|s| s.id == id)?;
        student.name = new.name;
        student.age = new.age;
        Some(student.clone())
    }

    /// Removes the record, keeping the relative order of the rest.
    pub fn delete(&self, id: i64) -> bool {
        let mut roster = self.roster();
        match roster.students.iter().position(|s| s.id == id) {
            Some(idx) => {
                roster.students.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.roster().students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StudentStore {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    fn new(name: &str, age: i64) -> NewStudent {
        NewStudent { name: name.to_owned(), age }
    }

    #[test]
    fn ids_start_at_one_and_increase() {
        let store = StudentStore::new();
        let a = store.create(new("Alice", 20));
        let b = store.create(new("Bob", 21));
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list(), vec![a, b]);
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let store = StudentStore::new();
        store.create(new("Alice", 20));
        let bob = store.create(new("Bob", 21));

        assert!(store.delete(bob.id));
        assert!(!store.delete(bob.id));
        assert_eq!(store.get(bob.id), None);

        let carol = store.create(new("Carol", 22));
        assert_eq!(carol.id, 3);
    }

    #[test]
    fn delete_preserves_order_of_the_rest() {
        let store = StudentStore::new();
        for (name, age) in [("a", 1), ("b", 2), ("c", 3), ("d", 4)] {
            store.create(new(name, age));
        }
        assert!(store.delete(2));

        let names: Vec<_> = store.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["a", "c", "d"]);
    }

    #[test]
    fn update_keeps_id_and_position() {
        let store = StudentStore::new();
        store.create(new("Alice", 20));
        store.create(new("Bob", 21));

        let updated = store.update(1, new("Alicia", 30)).unwrap();
        assert_eq!(updated, Student { id: 1, name: "Alicia".into(), age: 30 });
        assert_eq!(store.list()[0], updated);
        assert_eq!(store.update(9, new("Nobody", 1)), None);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_creates_get_distinct_ids() {
        let store = Arc::new(StudentStore::new());
        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new(&format!("s{i}"), 18)).id })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            assert!(ids.insert(task.await.unwrap()));
        }
        assert_eq!(ids.len(), 64);
        assert_eq!(store.len(), 64);
        assert_eq!(ids.iter().max(), Some(&64));
    }
}
