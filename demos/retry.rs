use retry_once::Once;

fn main() {
    let once = Once::new();

    for attempt in 1..=3 {
        let result = once.try_call_once(|| {
            if attempt < 3 {
                Err("error")
            } else {
                Ok(())
            }
        });

        match result {
            Ok(()) => println!("try {} success", attempt),
            Err(e) => println!("try {} {}", attempt, e),
        }
    }

    if once.state().is_closed() {
        println!("gate closed");
    }
}
