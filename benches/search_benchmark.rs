// Search Engine Performance Benchmarks
use artisan_order_manager::catalog::{AcceptAllDomains, CatalogService};
use artisan_order_manager::models::{Money, ProductDraft};
use artisan_order_manager::search::{normalize, rank_and_filter, search_page, FnProjection, PageRequest};
use artisan_order_manager::state::create_in_memory_store;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Clone)]
struct Item {
    id: u64,
    name: String,
}

const WORDS: [&str; 8] = [
    "Manta", "Poncho", "Cerámica", "Tapiz", "Aguayo", "Chompa", "Sombrero", "Ñandutí",
];

fn catalog(size: usize) -> Vec<Item> {
    (0..size)
        .map(|i| Item {
            id: i as u64 + 1,
            name: format!("{} {} de alpaca {}", WORDS[i % 8], WORDS[(i / 8) % 8], i),
        })
        .collect()
}

fn normalize_text(c: &mut Criterion) {
    c.bench_function("normalize_ascii", |b| {
        b.iter(|| normalize(black_box("Poncho de Alpaca Tejido a Mano")))
    });
    c.bench_function("normalize_accented", |b| {
        b.iter(|| normalize(black_box("Cerámica de Ayacucho con Ñandutí")))
    });
}

fn rank_throughput(c: &mut Criterion) {
    let projection = FnProjection::new(|item: &Item| item.name.as_str(), |item: &Item| item.id);
    let mut group = c.benchmark_group("rank_and_filter");

    for size in [100usize, 1_000, 10_000].iter() {
        let items = catalog(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &items, |b, items| {
            b.iter(|| rank_and_filter(items.clone(), black_box("ceramica"), &projection))
        });
    }
    group.finish();
}

fn paged_search(c: &mut Criterion) {
    let projection = FnProjection::new(|item: &Item| item.name.as_str(), |item: &Item| item.id);
    let items = catalog(5_000);

    c.bench_function("search_page_blank_query", |b| {
        b.iter(|| search_page(items.clone(), black_box(""), PageRequest::new(3, 20), &projection))
    });
    c.bench_function("search_page_inner_match", |b| {
        b.iter(|| search_page(items.clone(), black_box("alpaca"), PageRequest::new(3, 20), &projection))
    });
}

fn catalog_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let catalog = CatalogService::new(create_in_memory_store(), Arc::new(AcceptAllDomains));

    rt.block_on(async {
        for i in 0..1_000u32 {
            let draft = ProductDraft {
                name: format!("{} número {}", WORDS[i as usize % 8], i),
                description: None,
                price: Money::from_cents(1_000 + i as i64),
                stock: i % 50,
            };
            catalog.create_product(draft).await.unwrap();
        }
    });

    c.bench_function("catalog_search_products", |b| {
        b.iter(|| {
            rt.block_on(catalog.search_products(black_box("poncho"), PageRequest::new(1, 10)))
                .unwrap()
        })
    });
}

criterion_group!(benches, normalize_text, rank_throughput, paged_search, catalog_search);
criterion_main!(benches);
