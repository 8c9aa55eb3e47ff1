use pubmap_pubmed::parser::parse_pubmed_xml;
use pubmap_pubmed::transform::to_record;

fn synthetic_set(articles: usize) -> String {
    let mut xml = String::from("<?xml version=\"1.0\"?>\n<PubmedArticleSet>\n");
    for i in 0..articles {
        xml.push_str(&format!(
            r#"<PubmedArticle><MedlineCitation><PMID>{i}</PMID><Article>
<Journal><Title>Journal {j}</Title><JournalIssue><PubDate><Year>{y}</Year><Month>Mar</Month></PubDate></JournalIssue></Journal>
<ArticleTitle>Title {i}</ArticleTitle>
<Abstract><AbstractText>Abstract text for article {i}.</AbstractText></Abstract>
<AuthorList>
<Author><LastName>Smith{a}</LastName><ForeName>John</ForeName><Initials>J</Initials><AffiliationInfo><Affiliation>Univ {j}</Affiliation></AffiliationInfo></Author>
<Author><LastName>Doe{b}</LastName><ForeName>Anne</ForeName><Initials>A</Initials></Author>
<Author><LastName>Lee{a}</LastName><ForeName>Kim</ForeName><Initials>K</Initials></Author>
</AuthorList></Article></MedlineCitation>
<PubmedData><ArticleIdList><ArticleId IdType="doi">10.1/{i}</ArticleId></ArticleIdList></PubmedData></PubmedArticle>
"#,
            j = i % 50,
            y = 1995 + i % 30,
            a = i % 300,
            b = (i * 7) % 300,
        ));
    }
    xml.push_str("</PubmedArticleSet>\n");
    xml
}

#[divan::bench(args = [200, 2_000])]
fn parse_efetch_batch(bencher: divan::Bencher, articles: usize) {
    let xml = synthetic_set(articles);
    bencher.bench(|| parse_pubmed_xml(&xml).unwrap());
}

#[divan::bench]
fn parse_and_transform(bencher: divan::Bencher) {
    let xml = synthetic_set(200);
    bencher.bench(|| {
        parse_pubmed_xml(&xml)
            .unwrap()
            .into_iter()
            .map(to_record)
            .collect::<Vec<_>>()
    });
}

fn main() {
    divan::main();
}
