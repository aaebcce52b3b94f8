use avlmap::{AvlTreeMap, Reverse};

fn main() {
    let mut map = AvlTreeMap::new();
    map.insert(22, "Hallo");
    map.insert(26, "Welt");
    map.insert(12, "Servus");
    map.insert(1, "Tchuss");
    let (_, inserted) = map.insert(1, "Test");
    assert!(!inserted);
    assert_eq!(map.at(&1).ok(), Some(&"Tchuss"));

    for (k, v) in &map {
        println!("{k} => {v}");
    }

    // Walk backwards from the largest key with a cursor
    let mut cursor = map.cursor_back();
    while let Some((k, v)) = cursor.key_value() {
        println!("{k} <= {v}");
        cursor.move_prev();
    }

    let pos = map.lower_bound(&20);
    if let Some((k, _)) = map.entry_at(pos) {
        println!("first key not less than 20: {k}");
    }

    let erased = map.erase(&12);
    println!("erased {erased} entry, {} left", map.len());

    let mut reversed: AvlTreeMap<i32, &str, Reverse> = AvlTreeMap::with_comparator(Reverse);
    reversed.extend(&map);
    println!("{reversed:?}");
}
