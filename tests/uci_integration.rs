use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, Command, Stdio};
use std::thread;
use std::time::Duration;

use ember::board::GameState;

fn spawn_engine() -> (Child, ChildStdin, BufReader<std::process::ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_ember");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn engine binary");
    let stdin = child.stdin.take().unwrap();
    let stdout = BufReader::new(child.stdout.take().unwrap());
    (child, stdin, stdout)
}

fn read_until(reader: &mut BufReader<std::process::ChildStdout>, prefix: &str) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        let mut line = String::new();
        let bytes = reader.read_line(&mut line).expect("read failed");
        assert_ne!(bytes, 0, "engine closed stdout before '{prefix}'");
        let line = line.trim_end().to_string();
        let done = line.starts_with(prefix);
        lines.push(line);
        if done {
            return lines;
        }
    }
}

#[test]
fn handshake_and_movetime_search() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition startpos moves e2e4\ngo movetime 50\n")
        .unwrap();

    let header = read_until(&mut stdout, "uciok");
    assert!(header.iter().any(|l| l.starts_with("id name")));
    assert!(header.iter().any(|l| l.starts_with("id author")));

    read_until(&mut stdout, "readyok");

    let lines = read_until(&mut stdout, "bestmove");
    let bestmove = lines.last().unwrap();
    let mv = bestmove.split_whitespace().nth(1).expect("bestmove has a move");

    let mut state = GameState::new();
    state.make_move_uci("e2e4").unwrap();
    assert!(
        state.parse_move(mv).is_ok(),
        "bestmove {mv} is not legal after e2e4"
    );

    stdin.write_all(b"quit\n").unwrap();
    let status = child.wait().unwrap();
    assert!(status.success(), "quit should exit 0");
}

#[test]
fn go_depth_reports_a_legal_move() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition fen 8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1\ngo depth 3\n")
        .unwrap();
    read_until(&mut stdout, "readyok");

    let lines = read_until(&mut stdout, "bestmove");
    let mv = lines
        .last()
        .unwrap()
        .split_whitespace()
        .nth(1)
        .unwrap()
        .to_string();

    let state = GameState::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert!(state.parse_move(&mv).is_ok(), "{mv} is not legal here");

    stdin.write_all(b"quit\n").unwrap();
    child.wait().unwrap();
}

#[test]
fn stop_interrupts_go_infinite() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition startpos\ngo infinite\n")
        .unwrap();
    read_until(&mut stdout, "readyok");

    // Let a few iterations finish, then interrupt.
    thread::sleep(Duration::from_millis(200));
    stdin.write_all(b"stop\n").unwrap();

    let lines = read_until(&mut stdout, "bestmove");
    let mv = lines.last().unwrap().split_whitespace().nth(1).unwrap().to_string();
    assert_ne!(mv, "(none)", "an interrupted search still has a best move");

    let state = GameState::new();
    assert!(state.parse_move(&mv).is_ok());

    stdin.write_all(b"quit\n").unwrap();
    child.wait().unwrap();
}

#[test]
fn infinite_search_emits_progress_lines() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition startpos\ngo infinite\n")
        .unwrap();
    read_until(&mut stdout, "readyok");

    thread::sleep(Duration::from_millis(700));
    stdin.write_all(b"stop\n").unwrap();

    let lines = read_until(&mut stdout, "bestmove");
    let info = lines
        .iter()
        .find(|l| l.starts_with("info score cp "))
        .expect("periodic info line expected within 700ms");
    for field in ["depth", "nodes", "time", "pv"] {
        assert!(info.contains(field), "info line missing '{field}': {info}");
    }

    stdin.write_all(b"quit\n").unwrap();
    child.wait().unwrap();
}

#[test]
fn go_mate_finds_the_mating_move() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition fen 2K5/8/2k5/8/8/8/8/3q4 b - - 0 1\ngo mate 2\n")
        .unwrap();
    read_until(&mut stdout, "readyok");

    let lines = read_until(&mut stdout, "bestmove");
    assert_eq!(
        lines.last().unwrap().as_str(),
        "bestmove d1d7",
        "mate in two starts with the quiet queen lift"
    );

    stdin.write_all(b"quit\n").unwrap();
    child.wait().unwrap();
}

#[test]
fn perft_command_counts_startpos_moves() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(b"uci\nisready\nposition startpos\nperft 2\n")
        .unwrap();
    read_until(&mut stdout, "readyok");

    let lines = read_until(&mut stdout, "info string perft");
    let perft_line = lines.last().unwrap();
    assert!(
        perft_line.contains("depth 2") && perft_line.contains("nodes 400"),
        "unexpected perft output: {perft_line}"
    );

    stdin.write_all(b"quit\n").unwrap();
    child.wait().unwrap();
}

#[test]
fn malformed_input_does_not_kill_the_loop() {
    let (mut child, mut stdin, mut stdout) = spawn_engine();

    stdin
        .write_all(
            b"uci\nflibbertigibbet\nsetoption name Hash value 64\nposition startpos moves e2e5\nisready\nquit\n",
        )
        .unwrap();

    read_until(&mut stdout, "uciok");
    // The bad command, the rejected option and the illegal move are
    // reported on stderr; the loop must still answer isready.
    read_until(&mut stdout, "readyok");

    let status = child.wait().unwrap();
    assert!(status.success());
}
