//! 并发测试
//!
//! 多个线程共享同一个驱动实例时，线路上的命令包不能交错。
//! Mock 链路逐字节写出并在字节之间休眠，放大交错窗口。

use crossbeam_channel::unbounded;
use s2_link::{MockLink, MockLinkConfig};
use s2_sdk::driver::S2Path;
use s2_sdk::protocol::{Opcode, PathCommand};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

const THREADS: usize = 4;
const COMMANDS_PER_THREAD: usize = 8;

fn slow_link() -> MockLink {
    MockLink::new(MockLinkConfig {
        byte_delay: Duration::from_micros(200),
        ..Default::default()
    })
}

/// 按操作码把线路字节流切分成完整的命令包
fn split_wire(wire: &[u8]) -> Vec<Vec<u8>> {
    let mut packets = Vec::new();
    let mut rest = wire;
    while let Some(&op) = rest.first() {
        let len = match Opcode::try_from(op).expect("unknown opcode on wire") {
            Opcode::SetPath => {
                if rest.get(1) == Some(&1) {
                    4
                } else {
                    2
                }
            },
            Opcode::GetPosn | Opcode::GetAngle => 1,
            Opcode::SetPosn => 9,
            Opcode::SetAngle => 5,
            Opcode::Move => 6,
            Opcode::Turn => 4,
            Opcode::Arc => 8,
        };
        assert!(rest.len() >= len, "truncated packet at end of wire");
        let (packet, tail) = rest.split_at(len);
        packets.push(packet.to_vec());
        rest = tail;
    }
    packets
}

fn command_for(thread_id: usize, i: usize) -> PathCommand {
    let v = (thread_id * 1000 + i) as i32;
    match i % 4 {
        0 => PathCommand::set_posn(v, -v),
        1 => PathCommand::arc_by(v, v, 10),
        2 => PathCommand::turn_to(v),
        _ => PathCommand::set_angle(v),
    }
}

#[test]
fn test_concurrent_commands_do_not_interleave() {
    let path = S2Path::new(slow_link());
    let wire = path.shared_link().lock().wire();
    let barrier = Arc::new(Barrier::new(THREADS));
    let (tx, rx) = unbounded();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            let tx = tx.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..COMMANDS_PER_THREAD {
                    let command = command_for(t, i);
                    let ok = path.execute(&command).is_ok();
                    tx.send((command, ok)).unwrap();
                }
            })
        })
        .collect();
    drop(tx);

    for handle in handles {
        handle.join().unwrap();
    }

    let results: Vec<(PathCommand, bool)> = rx.iter().collect();
    assert_eq!(results.len(), THREADS * COMMANDS_PER_THREAD);
    assert!(results.iter().all(|(_, ok)| *ok));

    let wire = wire.lock().clone();
    let packets = split_wire(&wire);
    assert_eq!(packets.len(), THREADS * COMMANDS_PER_THREAD);

    // 每个线路包都是某次完整提交，且顺序与提交记录一致
    let link = path.shared_link().lock();
    let submitted: Vec<Vec<u8>> = link.submissions().iter().map(|s| s.bytes.clone()).collect();
    assert_eq!(packets, submitted);

    // 每个线程发出的所有命令都出现在线路上
    for (command, _) in &results {
        let expected = command.to_packet().unwrap().as_bytes().to_vec();
        assert!(packets.contains(&expected), "missing packet for {:?}", command);
    }
}

#[test]
fn test_reply_goes_to_requesting_thread() {
    let path = S2Path::new(slow_link());
    let barrier = Arc::new(Barrier::new(2));

    let reader = {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            (0..20).map(|_| path.get_angle()).collect::<Vec<_>>()
        })
    };
    let writer = {
        let path = path.clone();
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            for i in 0..20 {
                path.set_posn(i, i).unwrap();
            }
        })
    };

    writer.join().unwrap();
    let angles = reader.join().unwrap();

    // 角度始终为 0；如果读到了别的命令的应答，这里会解析出传感器字节
    for angle in angles {
        assert_eq!(angle.unwrap(), 0);
    }
    assert_eq!(path.metrics_snapshot().commands_total, 40);
}

#[test]
fn test_waiter_blocks_while_link_held() {
    let path = S2Path::new(MockLink::default());
    let guard = path.shared_link().lock();

    let other = path.clone();
    let (tx, rx) = unbounded();
    let handle = thread::spawn(move || {
        let result = other.get_posn();
        tx.send(result.is_ok()).unwrap();
    });

    // 持锁期间其他线程的命令不能完成
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    drop(guard);

    assert!(rx.recv_timeout(Duration::from_secs(5)).unwrap());
    handle.join().unwrap();
}
