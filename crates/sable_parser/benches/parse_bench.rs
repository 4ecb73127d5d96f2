use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sable_core::arena::ParseArena;
use sable_core::text::{TextChangeRange, TextSpan};
use sable_parser::{parse_source_file, update_source_file, ParseOptions};

const SABLE_SOURCE: &str = r#"
import { Logger } from "./logging";
import * as util from "./util";

interface Shape {
    area(): number;
    perimeter(): number;
    readonly name: string;
}

type Point = { x: number; y: number };
type ShapeFactory = (origin: Point) => Shape;

enum Kind {
    Circle,
    Rectangle = 10,
    Triangle,
}

/**
 * A circle centered on an origin point.
 * @param radius distance from the center to the edge
 */
class Circle implements Shape {
    readonly name = "circle";
    #origin: Point;

    constructor(origin: Point, public radius: number) {
        this.#origin = origin;
    }

    area(): number {
        return Math.PI * this.radius ** 2;
    }

    perimeter(): number {
        return 2 * Math.PI * this.radius;
    }

    get origin(): Point {
        return this.#origin;
    }

    static unit(): Circle {
        return new Circle({ x: 0, y: 0 }, 1);
    }
}

namespace Geometry.Helpers {
    export function distance(a: Point, b: Point): number {
        const dx = a.x - b.x;
        const dy = a.y - b.y;
        return Math.sqrt(dx * dx + dy * dy);
    }
}

function describe(shape: Shape): string {
    const rounded = shape.area().toFixed(2);
    return `${shape.name}: area=${rounded}`;
}

async function summarize(shapes: Shape[]): Promise<string[]> {
    const lines: string[] = [];
    for (const shape of shapes) {
        lines.push(describe(shape));
    }
    return lines;
}

function* ids(): Generator<number> {
    let next = 0;
    while (true) {
        yield next++;
    }
}

const factories: Record<string, ShapeFactory> = {
    circle: (origin) => new Circle(origin, 1),
};

function main(): void {
    const logger = new Logger("bench");
    const shapes: Shape[] = [];
    for (let i = 0; i < 100; i++) {
        const kind = i % 2 === 0 ? Kind.Circle : Kind.Rectangle;
        switch (kind) {
            case Kind.Circle:
                shapes.push(factories.circle({ x: i, y: i }));
                break;
            default:
                shapes.push(Circle.unit());
                break;
        }
    }
    try {
        summarize(shapes).then((lines) => {
            for (const line of lines) {
                logger.info(line);
            }
        });
    } catch (error) {
        logger.error(util.stringify(error));
    }
}

main();
"#;

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_source_file", |b| {
        b.iter(|| {
            let arena = ParseArena::new();
            let file = parse_source_file(
                &arena,
                "bench.sa",
                black_box(SABLE_SOURCE),
                ParseOptions::default(),
            );
            black_box(file.node_count)
        })
    });
}

fn bench_incremental(c: &mut Criterion) {
    // Edit the digit inside `toFixed(2)` in the body of `describe`.
    let byte = SABLE_SOURCE.find("toFixed(2)").unwrap_or(0);
    let edit_at = SABLE_SOURCE[..byte].chars().count() as u32 + 8;
    let new_text = SABLE_SOURCE.replace("toFixed(2)", "toFixed(3)");
    let change = TextChangeRange::new(TextSpan::new(edit_at, 1), 1);

    c.bench_function("update_source_file", |b| {
        b.iter(|| {
            let arena = ParseArena::new();
            let old = arena.alloc(parse_source_file(
                &arena,
                "bench.sa",
                SABLE_SOURCE,
                ParseOptions::default(),
            ));
            let updated = update_source_file(
                &arena,
                black_box(old),
                black_box(&new_text),
                change,
                false,
            );
            black_box(updated.node_count)
        })
    });
}

criterion_group!(benches, bench_parse, bench_incremental);
criterion_main!(benches);
