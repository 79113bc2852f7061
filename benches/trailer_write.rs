use criterion::{black_box, criterion_group, criterion_main, Criterion};
use id3v1_rs::id3v1::splice::write_trailer;
use id3v1_rs::{decode, EncodedTag, SpliceOptions, TagRecord};
use std::num::NonZeroU8;

fn sample() -> TagRecord {
    TagRecord {
        title: "01 TempleOS Hymn Risen (Remix)".into(),
        artist: "Terry A. Davis".into(),
        album: "Hymns".into(),
        year: "2017".into(),
        comment: "bench".into(),
        genre: Some(52),
        track: NonZeroU8::new(1),
    }
}

fn bench_codec(c: &mut Criterion) {
    let record = sample();
    let encoded = EncodedTag::encode(&record);

    let mut group = c.benchmark_group("codec");
    group.bench_function("encode", |b| b.iter(|| EncodedTag::encode(black_box(&record))));
    group.bench_function("decode", |b| b.iter(|| decode(black_box(encoded.as_bytes()))));
    group.finish();
}

fn bench_splice(c: &mut Criterion) {
    let tmp = tempfile::NamedTempFile::new().expect("temp file");
    std::fs::write(tmp.path(), vec![0u8; 1 << 20]).expect("seed file");
    let path = tmp.path().to_str().expect("utf-8 temp path").to_string();
    let record = sample();
    let options = SpliceOptions::default();

    c.bench_function("overwrite_1mb", |b| {
        b.iter(|| write_trailer(black_box(&path), &record, &options).unwrap())
    });
}

criterion_group!(benches, bench_codec, bench_splice);
criterion_main!(benches);
