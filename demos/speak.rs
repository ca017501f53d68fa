use inline_poly::{variant_set, Poly, PolyError, Variant, Visitor};

// Example trait: Animal
trait Animal {
    fn make_sound(&self) -> &str;
}

#[derive(Clone, Debug)]
struct Cat {
    name: String,
}

impl Animal for Cat {
    fn make_sound(&self) -> &str {
        "Meow!"
    }
}

#[derive(Clone, Debug)]
struct Dog {
    name: String,
}

impl Animal for Dog {
    fn make_sound(&self) -> &str {
        "Woof!"
    }
}

variant_set! {
    #[derive(Clone, Debug)]
    enum Pet: dyn Animal {
        Cat(Cat),
        Dog(Dog),
    }
}

/// Prints the name, which only the concrete types know about.
struct Introduce;

impl Visitor<Pet> for Introduce {
    type Output = String;

    fn visit<T: Variant<Pet>>(self, value: &T) -> String {
        let any: &dyn std::any::Any = value;
        let name = match (any.downcast_ref::<Cat>(), any.downcast_ref::<Dog>()) {
            (Some(cat), _) => cat.name.as_str(),
            (_, Some(dog)) => dog.name.as_str(),
            _ => "someone",
        };
        format!("{} says: {}", name, value.as_base().make_sound())
    }
}

fn main() -> Result<(), PolyError> {
    // RUST_LOG=inline_poly=trace shows every lifecycle transition
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut x = Poly::<Pet>::new();
    assert!(x.is_empty());

    x.set(Cat {
        name: "Whiskers".to_string(),
    });
    println!("{}", x.make_sound());

    x.set(Dog {
        name: "Rover".to_string(),
    });
    println!("{}", x.make_sound());
    assert!(x.holds::<Dog>());

    let mut y = x.clone();
    assert!(y.holds_any());
    y.set(Cat {
        name: "Tom".to_string(),
    });
    assert!(y.holds::<Cat>());
    if let Some(line) = y.visit(Introduce) {
        println!("{}", line);
    }

    let z = x.take();
    assert!(z.holds::<Dog>() && x.is_empty());
    println!("{}", z.make_sound());

    // Typed access with proper error handling
    match z.with::<Cat, _, _>(|cat| cat.name.clone()) {
        Ok(name) => println!("Cat named {}", name),
        Err(PolyError::TypeMismatch { held, .. }) => println!("Not a cat, it is a {}", held),
        Err(e) => println!("Unexpected error: {}", e),
    }

    let name = z.with::<Dog, _, _>(|dog| dog.name.clone())?;
    println!("Dog named {}", name);

    Ok(())
}
