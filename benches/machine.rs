use std::collections::BTreeMap;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vending_machine::{Amount, Command, Denomination, Drink, MachineConfig, VendingMachine};

/// Generates customer sessions for benchmarking.
///
/// Pattern per session (repeating):
/// 1. Cash: insert 1000, insert 500, buy cola, take the 400 change
/// 2. Card: authorize 600, buy water
///
/// Every `cancel_every`th cash session is cancelled instead of completed.
pub struct SessionGenerator {
    sessions: u32,
    current_session: u32,
    cancel_every: u32,
    pending: Vec<Command>,
}

impl SessionGenerator {
    pub fn new(sessions: u32, cancel_every: u32) -> Self {
        Self {
            sessions,
            current_session: 0,
            cancel_every,
            pending: Vec::new(),
        }
    }

    fn session(&self) -> Vec<Command> {
        let cancelled = self.cancel_every > 0 && self.current_session % self.cancel_every == 0;
        // pushed in reverse, popped in order
        if self.current_session % 2 == 1 {
            vec![
                Command::Purchase {
                    drink: "water".into(),
                },
                Command::AuthorizeCard {
                    card: "1234-5678".into(),
                    amount: Amount::new(600),
                },
            ]
        } else if cancelled {
            vec![
                Command::Cancel,
                Command::InsertCash {
                    amount: Amount::new(500),
                },
                Command::InsertCash {
                    amount: Amount::new(1000),
                },
            ]
        } else {
            vec![
                Command::ReturnCash,
                Command::Purchase {
                    drink: "cola".into(),
                },
                Command::InsertCash {
                    amount: Amount::new(500),
                },
                Command::InsertCash {
                    amount: Amount::new(1000),
                },
            ]
        }
    }
}

impl Iterator for SessionGenerator {
    type Item = Command;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending.is_empty() {
            if self.current_session >= self.sessions {
                return None;
            }
            self.pending = self.session();
            self.current_session += 1;
        }
        self.pending.pop()
    }
}

/// A machine stocked well enough that no session runs dry.
fn stocked_machine() -> VendingMachine {
    let config = MachineConfig::new(
        vec![
            Drink::new("cola", "Cola", 1_100, u32::MAX),
            Drink::new("water", "Water", 600, u32::MAX),
        ],
        BTreeMap::from([
            (Denomination::Coin100, 10_000_000),
            (Denomination::Coin500, 1_000_000),
            (Denomination::Bill1000, 1_000_000),
        ]),
    );
    VendingMachine::new(config).expect("valid bench config")
}

fn bench_sessions(c: &mut Criterion) {
    let mut group = c.benchmark_group("sessions");

    for count in [1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let mut machine = stocked_machine();
                for command in SessionGenerator::new(count, 0) {
                    let _ = black_box(machine.apply(command));
                }
                machine
            });
        });
    }

    group.finish();
}

fn bench_with_cancels(c: &mut Criterion) {
    let mut group = c.benchmark_group("with_cancels");

    group.bench_function("100k_cancel_10pct", |b| {
        b.iter(|| {
            let mut machine = stocked_machine();
            for command in SessionGenerator::new(100_000, 10) {
                let _ = black_box(machine.apply(command));
            }
            machine
        });
    });

    group.finish();
}

fn bench_change_making(c: &mut Criterion) {
    let mut group = c.benchmark_group("change_making");

    for target in [400u64, 3_900, 98_700] {
        group.bench_with_input(BenchmarkId::from_parameter(target), &target, |b, &target| {
            let machine = stocked_machine();
            b.iter(|| black_box(machine.vault().plan(Amount::new(target))));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_sessions,
    bench_with_cancels,
    bench_change_making,
);

criterion_main!(benches);
