use core::hint::black_box;
use criterion::{criterion_group, criterion_main, Criterion};

const LINES: [&str; 11] = [
    "ADCO 270622224349 B",
    "OPTARIF HC.. <",
    "ISOUSC 30 9",
    "HCHC 014460852 $",
    "HCHP 012506372 -",
    "PTEC HP..  ",
    "IINST 002 Y",
    "IMAX 035 G",
    "PAPP 00520 (",
    "HHPHC C .",
    "MOTDETAT 000000 B",
];

mod step {
    use teleinfo_codec::{Decoder, Status};

    pub fn bench(input: &[u8]) -> usize {
        let mut decoder = Decoder::new();
        let mut frames = 0;

        for &byte in input {
            if let Ok(Status::Complete) = decoder.step(byte) {
                frames += 1;
            }
        }

        frames
    }
}

mod framed_read {
    use futures::StreamExt;
    use teleinfo_codec::FramedRead;

    pub fn bench(input: &[u8]) {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let mut framed_read = FramedRead::<1024, _>::new(input);
                framed_read.stream().collect::<Vec<_>>().await;
            })
    }
}

mod tokio_codec {
    use futures::StreamExt;
    use teleinfo_codec::tokio::TeleinfoCodec;
    use tokio_util::codec::FramedRead;

    pub fn bench(input: &[u8]) {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let framed_read = FramedRead::new(input, TeleinfoCodec::new());
                framed_read.collect::<Vec<_>>().await;
            });
    }
}

fn generate_input(n: usize) -> Vec<u8> {
    let mut frame = vec![0x02];

    for line in LINES {
        frame.push(0x0A);
        frame.extend_from_slice(line.as_bytes());
        frame.push(0x0D);
    }

    frame.push(0x03);

    frame.repeat(n)
}

fn criterion_benchmark(c: &mut Criterion) {
    let n = 10000;
    let input = generate_input(n);

    c.bench_function("step", |b| b.iter(|| step::bench(black_box(&input))));
    c.bench_function("framed_read", |b| {
        b.iter(|| framed_read::bench(black_box(&input)))
    });
    c.bench_function("tokio_codec", |b| {
        b.iter(|| tokio_codec::bench(black_box(&input)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
