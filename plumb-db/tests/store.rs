use plumb_db::tree::{EntryMode, TreeData};
use plumb_db::{layout, Database, Error, Hash, ObjectKind, Oid};

fn init_store() -> (tempdir::TempDir, Database) {
    let work = tempdir::TempDir::new("plumb").unwrap();
    let meta = layout::init(work.path()).unwrap();
    (work, Database::open(meta).unwrap())
}

#[test]
fn blob_round_trip() {
    let (_work, db) = init_store();

    let oid = db.put(ObjectKind::Blob, b"hello\n").unwrap();
    assert_eq!(
        oid,
        plumb_db::address_of(b"blob 6\x00hello\n"),
    );
    assert_eq!(oid.to_string(), "ce013625030ba8dba906f756967f9e9ca394464a");

    let object = db.get(oid).unwrap();
    assert_eq!(object.kind(), ObjectKind::Blob);
    assert_eq!(object.data(), b"hello\n");

    // a second put is a no-op
    assert_eq!(db.put(ObjectKind::Blob, b"hello\n").unwrap(), oid);
    assert_eq!(db.iter().unwrap().count(), 1);
}

#[test]
fn large_blob_and_tree_round_trip() {
    let (work, db) = init_store();

    let contents = b"line of text that repeats\n".repeat(400);
    let blob = db.put(ObjectKind::Blob, &contents).unwrap();
    assert_eq!(db.get(blob).unwrap().data(), &contents[..]);

    for i in 0..50 {
        std::fs::write(work.path().join(format!("f{:02}", i)), &contents[..i * 100]).unwrap();
    }
    std::fs::write(work.path().join("big"), &contents).unwrap();

    let root = db.write_tree(work.path()).unwrap();
    let tree = db.lookup_tree(root).unwrap();
    assert_eq!(tree.len(), 51);
    assert_eq!(tree.entry("big").unwrap().oid(), blob);
    assert_eq!(
        db.lookup_blob(tree.entry("f49").unwrap().oid()).unwrap().data(),
        &contents[..4900]
    );
}

#[test]
fn snapshot_file_and_empty_directory() {
    let (work, db) = init_store();
    std::fs::write(work.path().join("a.txt"), b"x").unwrap();
    std::fs::create_dir(work.path().join("sub")).unwrap();

    let root = db.write_tree(work.path()).unwrap();
    let tree = db.lookup_tree(root).unwrap();

    let entries: Vec<_> = tree
        .iter()
        .map(|(name, entry)| (name.to_string(), entry.mode(), entry.oid()))
        .collect();
    assert_eq!(
        entries,
        [
            (
                "a.txt".to_string(),
                EntryMode::File,
                db.hash_object(ObjectKind::Blob, b"x")
            ),
            ("sub".to_string(), EntryMode::Directory, TreeData::EMPTY_ID),
        ]
    );

    let empty = db.get(TreeData::EMPTY_ID).unwrap();
    assert_eq!(empty.kind(), ObjectKind::Tree);
    assert_eq!(empty.size(), 0);
}

#[test]
fn root_commit_payload() {
    let (_work, db) = init_store();
    let tree = db.write(&TreeData::new()).unwrap();

    let commit = db
        .make_commit(tree, None, "A", "a@x", "init", 1000, "+0000")
        .unwrap();

    let object = db.get(commit).unwrap();
    assert_eq!(object.kind(), ObjectKind::Commit);
    let expected = format!(
        "tree {}\nauthor A <a@x> 1000 +0000\ncommitter A <a@x> 1000 +0000\n\ninit\n",
        tree
    );
    assert_eq!(std::str::from_utf8(object.data()).unwrap(), expected);

    let parsed = db.lookup_commit(commit).unwrap();
    assert_eq!(parsed.tree(), tree);
    assert!(parsed.parents().is_empty());
    assert_eq!(parsed.hash().unwrap().0, commit);
}

#[test]
fn commit_chain_and_prefix_lookup() {
    let (work, db) = init_store();
    std::fs::write(work.path().join("file"), "one").unwrap();

    let first_tree = db.write_tree(work.path()).unwrap();
    let first = db
        .make_commit(first_tree, None, "A", "a@x", "first", 1000, "+0100")
        .unwrap();

    std::fs::write(work.path().join("file"), "two").unwrap();
    let second_tree = db.write_tree(work.path()).unwrap();
    assert_ne!(first_tree, second_tree);

    let second = db
        .make_commit(second_tree, Some(first), "A", "a@x", "second\n", 2000, "-0230")
        .unwrap();

    let parsed = db.lookup_commit(second).unwrap();
    assert_eq!(parsed.parent(), Some(first));
    assert_eq!(parsed.message(), "second\n");
    assert_eq!(parsed.author().timezone(), "-0230");

    let short = &second.to_string()[..10];
    assert_eq!(db.resolve(short).unwrap(), second);
    assert_eq!(db.resolve(&short.to_uppercase()).unwrap(), second);
}

#[test]
fn commit_requires_stored_tree() {
    let (_work, db) = init_store();
    let missing = Oid::from_bytes([7; 20]);

    assert!(matches!(
        db.make_commit(missing, None, "A", "a@x", "init", 1000, "+0000"),
        Err(Error::ObjectNotFound(oid)) if oid == missing
    ));
    assert_eq!(db.iter().unwrap().count(), 0);
}
