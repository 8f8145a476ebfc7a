use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use bb_app::{HanziBox, RectI32, SizeF};
use bb_hanzi::{PinyinConverter, ToneStyle};
use bb_overlay::{EstimatedMeasure, LayoutParams, layout_overlay};

const SENTENCE: &str = "我喜欢吃饺子，你呢？今天天气很好，我们去公园散步吧！";

/// Pinyin conversion for growing inputs in each tone style.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pinyin Conversion");

    for repeat in [1, 10, 100] {
        let text = SENTENCE.repeat(repeat);
        for style in [ToneStyle::Marks, ToneStyle::Numbers, ToneStyle::None] {
            let converter = PinyinConverter::with_style(style);
            group.bench_with_input(
                BenchmarkId::new(style.as_str(), repeat),
                &text,
                |b, text| b.iter(|| black_box(converter.convert(black_box(text)))),
            );
        }
    }

    group.finish();
}

fn boxes(count: usize) -> Vec<HanziBox> {
    let converter = PinyinConverter::new();
    (0..count)
        .map(|i| {
            let hanzi = "饺子".to_string();
            HanziBox {
                pinyin: converter.convert(&hanzi),
                hanzi,
                rect: RectI32::from_xywh((i as i32 % 10) * 100, (i as i32 / 10) * 60, 90, 50),
            }
        })
        .collect()
}

/// Overlay layout for a frame full of boxes.
fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("Overlay Layout");

    for count in [10, 100, 500] {
        let boxes = boxes(count);
        for is_live in [false, true] {
            let params = LayoutParams {
                image_size: SizeF::new(1920.0, 1080.0),
                view_size: SizeF::new(1280.0, 800.0),
                is_live,
                show_pinyin: true,
            };
            let name = if is_live { "live" } else { "captured" };
            group.bench_with_input(BenchmarkId::new(name, count), &boxes, |b, boxes| {
                b.iter(|| black_box(layout_overlay(black_box(boxes), &params, &EstimatedMeasure)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_layout);
criterion_main!(benches);
