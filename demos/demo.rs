use rskiplist::SkipList;

fn main() {
    let mut list = SkipList::new();

    for key in [3, 6, 7, 9, 12, 19] {
        list.insert(key);
    }
    for i in 0..10 {
        list.insert(10 * i + 2);
    }

    print!("{}", list);

    println!("Search 6: {}", list.search(&6));
    println!("Search 15: {}", list.search(&15));

    list.delete(&6);
    println!("After deleting 6:");
    print!("{}", list);
}
