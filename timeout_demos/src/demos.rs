//! Four independent examples of deferred callbacks interleaving with
//! synchronous output.

use std::{cell::Cell, io, rc::Rc, time::Duration};

use event_loop::EventLoop;

use crate::Console;

const LONG_INPUT_THRESHOLD: usize = 10;

/// A mutable string slot owned by one example and shared with its callbacks.
#[derive(Debug, Clone)]
pub struct Label(Rc<Cell<&'static str>>);

impl Label {
    pub fn new(value: &'static str) -> Self {
        Label(Rc::new(Cell::new(value)))
    }

    pub fn get(&self) -> &'static str {
        self.0.get()
    }

    pub fn set(&self, value: &'static str) {
        self.0.set(value);
    }
}

/// Prints `hello` now, then flips the label to `goodbye` after three seconds.
pub fn hello_goodbye(event_loop: &mut EventLoop, console: &Console) -> io::Result<Label> {
    let demo = Label::new("hello");

    let (label, out) = (demo.clone(), console.clone());
    event_loop.set_timeout(Duration::from_millis(3000), move |_| {
        label.set("goodbye");
        out.log(label.get())?;
        Ok(())
    });

    console.log(demo.get())?;
    Ok(demo)
}

pub fn describe_input(input: &str) -> &'static str {
    if input.chars().count() > LONG_INPUT_THRESHOLD {
        "Long input detected!"
    } else {
        "Short input."
    }
}

/// Echoes the input now and checks its length after three seconds.
pub fn simulate_user_input(
    event_loop: &mut EventLoop,
    console: &Console,
    input: impl Into<String>,
) -> io::Result<()> {
    let input = input.into();
    console.log(format!("User typed: {input}"))?;

    let out = console.clone();
    event_loop.set_timeout(Duration::from_millis(3000), move |_| {
        out.log(describe_input(&input))?;
        Ok(())
    });
    Ok(())
}

fn greet(console: &Console) -> io::Result<()> {
    console.log("Hello from inside the Function!")
}

pub fn greetings(event_loop: &mut EventLoop, console: &Console) -> io::Result<()> {
    console.log("Hello from outside the timer!")?;

    let out = console.clone();
    event_loop.set_timeout(Duration::from_millis(3000), move |_| {
        greet(&out)?;
        Ok(())
    });

    let out = console.clone();
    event_loop.set_timeout(Duration::from_millis(6000), move |_| {
        out.log("Hello from inside the timer !")?;
        Ok(())
    });
    Ok(())
}

/// Closes the store after five seconds, announces the reopening two seconds
/// later and reopens it three seconds after that, provided nothing else
/// changed the status in the meantime.
pub fn store_status(event_loop: &mut EventLoop, console: &Console) -> io::Result<Label> {
    let status = Label::new("open");
    console.log(format!("Initial status: {}", status.get()))?;

    let (label, out) = (status.clone(), console.clone());
    event_loop.set_timeout(Duration::from_millis(5000), move |event_loop| {
        label.set("closed");
        out.log(format!("Status updated: {}", label.get()))?;

        event_loop.set_timeout(Duration::from_millis(2000), move |event_loop| {
            out.log("The store will open soon.")?;

            event_loop.set_timeout(Duration::from_millis(3000), move |_| {
                if label.get() == "closed" {
                    out.log("Now open!")?;
                } else {
                    out.log("The store is still closed.")?;
                }
                Ok(())
            });
            Ok(())
        });
        Ok(())
    });

    Ok(status)
}

/// Registers every example on one loop, in order.
pub fn register_all(event_loop: &mut EventLoop, console: &Console) -> io::Result<()> {
    hello_goodbye(event_loop, console)?;
    simulate_user_input(event_loop, console, "Hello, world!")?;
    greetings(event_loop, console)?;
    store_status(event_loop, console)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_length_threshold() {
        assert_eq!(describe_input("Hello, world!"), "Long input detected!");
        assert_eq!(describe_input("0123456789"), "Short input.");
        assert_eq!(describe_input(""), "Short input.");
        // Counted in characters, not bytes.
        assert_eq!(describe_input("héllo wörld"), "Long input detected!");
        assert_eq!(describe_input("ééééé"), "Short input.");
    }

    #[test]
    fn label_is_shared_between_clones() {
        let label = Label::new("open");
        let other = label.clone();
        other.set("closed");
        assert_eq!(label.get(), "closed");
    }

    #[tokio::test(start_paused = true)]
    async fn hello_goodbye_reads_before_and_after() {
        let console = Console::capture();
        let mut event_loop = EventLoop::new();

        let demo = hello_goodbye(&mut event_loop, &console).unwrap();
        assert_eq!(demo.get(), "hello");
        assert_eq!(console.texts(), ["hello"]);

        event_loop.run().await.unwrap();
        assert_eq!(demo.get(), "goodbye");
        assert_eq!(console.texts(), ["hello", "goodbye"]);
    }

    #[tokio::test(start_paused = true)]
    async fn short_input_takes_the_other_branch() {
        let console = Console::capture();
        let mut event_loop = EventLoop::new();

        simulate_user_input(&mut event_loop, &console, "hi").unwrap();
        event_loop.run().await.unwrap();

        assert_eq!(console.texts(), ["User typed: hi", "Short input."]);
    }

    #[tokio::test(start_paused = true)]
    async fn outside_greeting_comes_first() {
        let console = Console::capture();
        let mut event_loop = EventLoop::new();

        greetings(&mut event_loop, &console).unwrap();
        event_loop.run().await.unwrap();

        assert_eq!(
            console.texts(),
            [
                "Hello from outside the timer!",
                "Hello from inside the Function!",
                "Hello from inside the timer !",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn store_reopens_while_closed() {
        let console = Console::capture();
        let mut event_loop = EventLoop::new();

        let status = store_status(&mut event_loop, &console).unwrap();
        assert_eq!(status.get(), "open");
        event_loop.run().await.unwrap();

        assert_eq!(status.get(), "closed");
        assert_eq!(
            console.texts(),
            [
                "Initial status: open",
                "Status updated: closed",
                "The store will open soon.",
                "Now open!",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn store_stays_closed_if_status_changed() {
        let console = Console::capture();
        let mut event_loop = EventLoop::new();

        let status = store_status(&mut event_loop, &console).unwrap();
        let meddler = status.clone();
        event_loop.set_timeout(Duration::from_millis(8000), move |_| {
            meddler.set("open");
            Ok(())
        });
        event_loop.run().await.unwrap();

        assert_eq!(
            console.texts().last().map(String::as_str),
            Some("The store is still closed.")
        );
    }
}
