use super::*;

#[test]
fn add_keeps_most_recent_last() {
	let mut history = HistoryList::new(10);
	history.add("set ts=4");
	history.add("set et");
	assert_eq!(history.iter().collect::<Vec<_>>(), ["set ts=4", "set et"]);
	assert_eq!(history.last(), Some("set et"));
}

#[test]
fn duplicate_moves_to_end() {
	let mut history = HistoryList::new(10);
	history.add("a");
	history.add("b");
	history.add("a");
	assert_eq!(history.iter().collect::<Vec<_>>(), ["b", "a"]);
}

#[test]
fn blank_entries_are_ignored() {
	let mut history = HistoryList::new(10);
	history.add("");
	history.add("   ");
	assert!(history.is_empty());
}

#[test]
fn limit_drops_oldest() {
	let mut history = HistoryList::new(2);
	for entry in ["a", "b", "c"] {
		history.add(entry);
	}
	assert_eq!(history.iter().collect::<Vec<_>>(), ["b", "c"]);

	history.set_limit(1);
	assert_eq!(history.iter().collect::<Vec<_>>(), ["c"]);

	history.set_limit(0);
	assert!(history.is_empty());
	history.add("d");
	assert!(history.is_empty());
}

#[test]
fn histories_share_limit_changes() {
	let histories = Histories::new(50);
	histories.set_limit(3);
	assert_eq!(histories.command.borrow().limit(), 3);
	assert_eq!(histories.search.borrow().limit(), 3);
}
