use core::error::Error;

use futures::StreamExt;
use teleinfo_codec::{tokio::Compat, FramedRead};
use tokio::io::AsyncWriteExt;

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

fn frame(lines: &[&str]) -> Vec<u8> {
    let mut frame = vec![0x02];

    for line in lines {
        frame.push(0x0A);
        frame.extend_from_slice(line.as_bytes());
        frame.push(0x0D);
    }

    frame.push(0x03);

    frame
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("reader=info,writer=info")
        .init();

    let (read, mut write) = tokio::io::duplex(64);

    let mut framed_read = FramedRead::<64, _>::new(Compat::new(read));

    let reader = async move {
        framed_read
            .stream()
            .for_each(|item| async move {
                match item {
                    Ok(snapshot) => {
                        tracing::info!(target: "reader", %snapshot, "received frame");
                    }
                    Err(err) => {
                        tracing::warn!(target: "reader", %err, "frame dropped");
                    }
                }
            })
            .await;

        Ok::<(), Box<dyn Error>>(())
    };

    let writer = async move {
        let mut corrupted = LINES;
        corrupted[8] = "PAPP 00999 (";

        // Start mid frame, like a meter that was already talking.
        let noise = frame(&LINES);
        let frames = [
            &noise[40..],
            frame(&LINES).as_slice(),
            frame(&corrupted).as_slice(),
            frame(&LINES).as_slice(),
        ]
        .concat();

        for chunk in frames.chunks(16) {
            tracing::info!(target: "writer", len = chunk.len(), "sending bytes");

            write.write_all(chunk).await?;
        }

        Ok::<(), Box<dyn Error>>(())
    };

    let (reader_result, writer_result) = tokio::join!(reader, writer);

    reader_result?;
    writer_result?;

    Ok(())
}
