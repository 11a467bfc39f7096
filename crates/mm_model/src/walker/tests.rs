use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use mm_utils::hash::HashSet;
use serde_json::{Map, Value, json};

use crate::info::ModelClass;
use crate::{
    HookStage, MapError, Model, ModelHooks, decode_array, decode_from_text, decode_from_value,
    decode_map, describe, encode_slice, encode_to_value, model_copy, model_eq, model_hash,
    populate_from_value, try_decode_from_value, try_encode_to_value,
};

// -----------------------------------------------------------------------------
// Models

#[derive(Model, Debug)]
struct Book {
    name: String,
    #[model(key = "ext.desc")]
    desc: String,
    #[model(key = ["id", "ID", "book_id"])]
    id: u64,
    pages: Option<u32>,
}

#[derive(Model, Debug)]
#[model(Hooks = false)]
struct Account {
    id: u64,
    password: String,
}

impl ModelHooks for Account {
    fn blacklist() -> Option<&'static [&'static str]> {
        Some(&["password"])
    }
}

#[derive(Model, Debug)]
#[model(Hooks = false)]
struct Profile {
    name: String,
    age: u32,
    email: String,
}

impl ModelHooks for Profile {
    fn whitelist() -> Option<&'static [&'static str]> {
        Some(&["name"])
    }

    fn blacklist() -> Option<&'static [&'static str]> {
        Some(&["name", "age"])
    }
}

#[derive(Model, Debug)]
#[model(Hooks = false)]
struct Item {
    n: u32,
    label: String,
}

impl ModelHooks for Item {
    fn did_decode(&mut self, object: &Map<String, Value>) -> bool {
        object.contains_key("n")
    }
}

#[derive(Model, Debug)]
struct Cart {
    items: Vec<Item>,
}

#[derive(Model, Debug)]
struct Order {
    item: Item,
    note: Option<String>,
}

#[derive(Model, Debug)]
#[model(Hooks = false)]
struct Legacy {
    name: String,
}

impl ModelHooks for Legacy {
    fn will_decode(object: &Map<String, Value>) -> Option<Cow<'_, Map<String, Value>>> {
        if object.contains_key("blocked") {
            return None;
        }
        match object.get("title") {
            Some(title) => {
                let mut replaced = object.clone();
                replaced.insert("name".into(), title.clone());
                Some(Cow::Owned(replaced))
            }
            None => Some(Cow::Borrowed(object)),
        }
    }

    fn did_encode(&self, object: &mut Map<String, Value>) -> bool {
        object.insert("version".into(), json!(2));
        !self.name.is_empty()
    }
}

#[derive(Model, Debug)]
struct Shape {
    name: String,
}

#[derive(Model, Debug)]
struct Circle {
    name: String,
    radius: f64,
}

#[derive(Model, Debug)]
#[model(select = pick_shape)]
enum AnyShape {
    #[model(base)]
    Shape(Shape),
    Circle(Circle),
}

fn pick_shape(object: &Map<String, Value>) -> Option<ModelClass> {
    object.contains_key("radius").then(ModelClass::of::<Circle>)
}

#[derive(Model, Debug)]
struct Canvas {
    shapes: Vec<AnyShape>,
}

#[derive(Model, Debug)]
#[model(Hooks = false)]
struct Stray {
    a: u32,
}

impl ModelHooks for Stray {
    fn select_class(_: &Map<String, Value>) -> Option<ModelClass> {
        Some(ModelClass::of::<Book>())
    }
}

#[derive(Model, Debug)]
struct Author {
    name: String,
}

#[derive(Model, Debug)]
struct Review {
    #[model(key = "author")]
    writer: Arc<Author>,
    #[model(key = "author")]
    editor: Arc<Author>,
}

#[derive(Model, Debug)]
struct Page<T> {
    items: Vec<T>,
    total: u32,
}

#[derive(Model, Debug)]
#[model(eq)]
struct Tag {
    name: String,
}

#[derive(Model, Debug)]
struct Cached {
    name: String,
    #[model(skip)]
    hits: u32,
}

#[derive(Model, Debug)]
struct Bag {
    raw: Vec<Value>,
    maybe: Vec<Option<u32>>,
    notes: BTreeMap<String, Option<String>>,
}

fn book_node() -> Value {
    json!({
        "name": "Rust",
        "ext": { "desc": "types" },
        "id": 7,
        "pages": 512,
    })
}

// -----------------------------------------------------------------------------
// Decode and encode

#[test]
fn round_trip() {
    let book: Book = decode_from_value(&book_node()).unwrap();
    assert_eq!(book.name, "Rust");
    assert_eq!(book.desc, "types");
    assert_eq!(book.id, 7);
    assert_eq!(book.pages, Some(512));

    assert_eq!(encode_to_value(&book).unwrap(), book_node());

    let again: Book = decode_from_value(&encode_to_value(&book).unwrap()).unwrap();
    assert!(model_eq(&book, &again));
}

#[test]
fn alias_priority() {
    let book: Book = decode_from_value(&json!({ "ID": 2, "id": 1 })).unwrap();
    assert_eq!(book.id, 1);

    let book: Book = decode_from_value(&json!({ "book_id": 3 })).unwrap();
    assert_eq!(book.id, 3);

    let node = encode_to_value(&book).unwrap();
    assert_eq!(node["id"], 3);
    assert!(node.get("book_id").is_none());
}

#[test]
fn lenient_attributes() {
    let book: Book = decode_from_value(&json!({
        "name": 12,
        "ext": "not an object",
        "id": "9",
        "pages": null,
    }))
    .unwrap();
    assert_eq!(book.name, "12");
    assert_eq!(book.desc, "");
    assert_eq!(book.id, 9);
    assert_eq!(book.pages, None);

    let node = encode_to_value(&book).unwrap();
    assert!(node.get("pages").is_none());
}

#[test]
fn not_an_object() {
    let err = try_decode_from_value::<Book>(&json!([1, 2])).unwrap_err();
    assert!(matches!(err, MapError::NotAnObject { type_name: "Book", .. }));
    assert!(decode_from_text::<Book>("{ not json").is_none());
    assert!(decode_from_text::<Book>(r#"{"name":"a"}"#).is_some());
}

#[test]
fn nested_model() {
    let order: Order = decode_from_value(&json!({ "item": { "n": 4, "label": "pen" } })).unwrap();
    assert_eq!(order.item.n, 4);
    assert_eq!(order.note, None);

    let node = encode_to_value(&order).unwrap();
    assert_eq!(node, json!({ "item": { "n": 4, "label": "pen" } }));

    // A rejected nested model leaves the attribute at its default.
    let order: Order = decode_from_value(&json!({ "item": {}, "note": "x" })).unwrap();
    assert_eq!(order.item.n, 0);
    assert_eq!(order.note.as_deref(), Some("x"));
}

// -----------------------------------------------------------------------------
// Filters

#[test]
fn blacklist_excludes() {
    let a: Account = decode_from_value(&json!({ "id": 1, "password": "x" })).unwrap();
    assert!(a.password.is_empty());
    assert_eq!(encode_to_value(&a).unwrap(), json!({ "id": 1 }));

    let b = Account {
        id: 1,
        password: "y".into(),
    };
    assert!(model_eq(&a, &b));
    assert_eq!(model_hash(&a), model_hash(&b));

    let c = Account {
        id: 2,
        password: String::new(),
    };
    assert!(!model_eq(&a, &c));
}

#[test]
fn whitelist_wins() {
    let profile: Profile = decode_from_value(&json!({ "name": "ann", "age": 3, "email": "a@b" })).unwrap();
    assert_eq!(profile.name, "ann");
    assert_eq!(profile.age, 0);
    assert!(profile.email.is_empty());
    assert_eq!(encode_to_value(&profile).unwrap(), json!({ "name": "ann" }));
}

// -----------------------------------------------------------------------------
// Containers

#[test]
fn container_skips_failed_elements() {
    let cart: Cart = decode_from_value(&json!({ "items": [{ "n": 1 }, { "bad": true }, 3] })).unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].n, 1);

    assert!(decode_from_value::<Item>(&json!({})).is_none());
    assert_eq!(
        Cart::schema().element_type("items"),
        Some(ModelClass::of::<Item>())
    );
}

#[test]
fn arrays_and_maps() {
    let items = decode_array::<Item>(&json!([{ "n": 1 }, { "x": 0 }, 3, { "n": 2 }])).unwrap();
    assert_eq!(items.iter().map(|item| item.n).collect::<Vec<_>>(), [1, 2]);
    assert!(decode_array::<Item>(&json!({})).is_none());

    let map = decode_map::<Item>(&json!({ "a": { "n": 1 }, "b": {} })).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map["a"].n, 1);
    assert!(decode_map::<Item>(&json!([])).is_none());

    assert_eq!(encode_slice(&items), json!([{ "n": 1, "label": "" }, { "n": 2, "label": "" }]));
}

#[test]
fn null_elements_survive() {
    let node = json!({
        "raw": [1, null, 2],
        "maybe": [1, null, 3],
        "notes": { "a": "x", "b": null },
    });
    let bag: Bag = decode_from_value(&node).unwrap();
    assert_eq!(bag.maybe, [Some(1), None, Some(3)]);

    let encoded = encode_to_value(&bag).unwrap();
    assert_eq!(encoded, node);
    assert!(model_eq(&bag, &decode_from_value::<Bag>(&encoded).unwrap()));
}

// -----------------------------------------------------------------------------
// Hooks

#[test]
fn will_decode_replaces_or_rejects() {
    let legacy: Legacy = decode_from_value(&json!({ "title": "old" })).unwrap();
    assert_eq!(legacy.name, "old");

    let err = try_decode_from_value::<Legacy>(&json!({ "blocked": true })).unwrap_err();
    assert!(matches!(
        err,
        MapError::Rejected {
            hook: HookStage::WillDecode,
            ..
        }
    ));
}

#[test]
fn did_encode_adjusts_or_rejects() {
    let legacy = Legacy { name: "x".into() };
    assert_eq!(encode_to_value(&legacy).unwrap(), json!({ "name": "x", "version": 2 }));

    let err = try_encode_to_value(&Legacy { name: String::new() }).unwrap_err();
    assert!(matches!(
        err,
        MapError::Rejected {
            hook: HookStage::DidEncode,
            ..
        }
    ));
}

#[test]
fn polymorphic_selection() {
    let shape: AnyShape = decode_from_value(&json!({ "name": "c", "radius": 2.0 })).unwrap();
    let AnyShape::Circle(circle) = &shape else {
        panic!("expected a circle, got {shape:?}");
    };
    assert_eq!(circle.radius, 2.0);
    assert_eq!(encode_to_value(&shape).unwrap(), json!({ "name": "c", "radius": 2.0 }));

    let plain: AnyShape = decode_from_value(&json!({ "name": "s" })).unwrap();
    assert!(matches!(plain, AnyShape::Shape(_)));
    assert!(!model_eq(&shape, &plain));

    let canvas: Canvas = decode_from_value(&json!({
        "shapes": [{ "name": "a" }, { "name": "b", "radius": 1 }],
    }))
    .unwrap();
    assert!(matches!(canvas.shapes[0], AnyShape::Shape(_)));
    assert!(matches!(canvas.shapes[1], AnyShape::Circle(_)));
    assert!(core::ptr::eq(AnyShape::schema(), Shape::schema()));
}

#[test]
fn unholdable_class_falls_back() {
    let stray: Stray = decode_from_value(&json!({ "a": 5 })).unwrap();
    assert_eq!(stray.a, 5);
}

// -----------------------------------------------------------------------------
// Populate

#[test]
fn populate_is_atomic() {
    let mut item = Item {
        n: 1,
        label: String::new(),
    };

    assert!(!populate_from_value(&mut item, &json!({ "label": "x" })));
    assert_eq!(item.n, 1);
    assert!(item.label.is_empty());

    assert!(populate_from_value(&mut item, &json!({ "n": 2, "label": "y" })));
    assert_eq!((item.n, item.label.as_str()), (2, "y"));

    assert!(populate_from_value(&mut item, &json!({ "n": 3 })));
    assert_eq!((item.n, item.label.as_str()), (3, "y"));

    assert!(!populate_from_value(&mut item, &json!("n")));
}

// -----------------------------------------------------------------------------
// Identity and copies

#[test]
fn shared_node_shares_arc() {
    let review: Review = decode_from_value(&json!({ "author": { "name": "ann" } })).unwrap();
    assert_eq!(review.writer.name, "ann");
    assert!(Arc::ptr_eq(&review.writer, &review.editor));

    let copy = model_copy(&review);
    assert!(!Arc::ptr_eq(&copy.writer, &review.writer));
    assert!(model_eq(&copy, &review));
}

#[test]
fn copy_is_deep() {
    let cart: Cart = decode_from_value(&json!({ "items": [{ "n": 1 }, { "n": 2 }] })).unwrap();
    let mut copy = model_copy(&cart);
    assert!(model_eq(&copy, &cart));
    assert_eq!(model_hash(&copy), model_hash(&cart));

    copy.items[0].n = 10;
    copy.items.pop();
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.items[0].n, 1);
    assert!(!model_eq(&copy, &cart));
}

#[test]
fn skipped_field() {
    let mut cached: Cached = decode_from_value(&json!({ "name": "a", "hits": 5 })).unwrap();
    assert_eq!(cached.hits, 0);
    assert_eq!(Cached::schema().len(), 1);

    cached.hits = 3;
    assert_eq!(model_copy(&cached).hits, 3);
    assert_eq!(encode_to_value(&cached).unwrap(), json!({ "name": "a" }));
}

// -----------------------------------------------------------------------------
// Generics and traits

#[test]
fn generic_models() {
    let books: Page<Book> = decode_from_value(&json!({ "items": [book_node()], "total": 1 })).unwrap();
    assert_eq!(books.items[0].id, 7);

    let numbers: Page<u32> = decode_from_value(&json!({ "items": [1, "2", "x"], "total": 2 })).unwrap();
    assert_eq!(numbers.items, [1, 2]);

    assert!(!core::ptr::eq(Page::<Book>::schema(), Page::<u32>::schema()));
    assert!(core::ptr::eq(Page::<u32>::schema(), Page::<u32>::schema()));
    assert_eq!(Page::<u32>::schema().len(), 2);
}

#[test]
fn schema_built_once_across_threads() {
    fn addresses<T: Model>() -> Vec<usize> {
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| core::ptr::from_ref(T::schema()) as usize))
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        })
    }

    let plain = addresses::<Bag>();
    assert!(plain.iter().all(|&addr| addr == plain[0]));
    assert_eq!(plain[0], core::ptr::from_ref(Bag::schema()) as usize);

    let generic = addresses::<Page<Bag>>();
    assert!(generic.iter().all(|&addr| addr == generic[0]));
    assert_eq!(generic[0], core::ptr::from_ref(Page::<Bag>::schema()) as usize);
}

#[test]
fn eq_attribute() {
    let mut tags: HashSet<Tag> = HashSet::default();
    tags.insert(Tag { name: "a".into() });
    tags.insert(Tag { name: "a".into() });
    tags.insert(Tag { name: "b".into() });
    assert_eq!(tags.len(), 2);
    assert_eq!(Tag { name: "x".into() }, Tag { name: "x".into() });
}

#[test]
fn describe_dump() {
    let book: Book = decode_from_value(&book_node()).unwrap();
    let text = describe(&book);
    assert!(text.starts_with("Book {"));
    assert!(text.contains("\"desc\": \"types\""));
}
