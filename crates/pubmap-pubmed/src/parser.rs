//! PubMed efetch XML parser using quick-xml
//!
//! Pulls out only what the coauthor graph needs: identifiers, title,
//! abstract, journal, publication date and the author list.

use anyhow::{Context, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Parsed `<PubmedArticle>`
#[derive(Debug, Default)]
pub struct PubmedArticle {
    pub pmid: String,
    pub doi: Option<String>,
    pub title: Option<String>,
    pub abstract_text: Option<String>,
    pub journal_title: Option<String>,

    // PubDate parts; MedlineDate is free text like "1998 Dec-1999 Jan"
    pub pub_year: Option<i32>,
    pub pub_month: Option<u32>,
    pub pub_day: Option<u32>,
    pub medline_date: Option<String>,

    pub authors: Vec<Author>,
}

#[derive(Debug, Default, Clone)]
pub struct Author {
    pub last_name: Option<String>,
    pub fore_name: Option<String>,
    pub initials: Option<String>,
    pub collective_name: Option<String>,
    pub affiliations: Vec<String>,
}

/// Parse every `<PubmedArticle>` in an efetch response.
///
/// An article that fails to parse is logged and dropped; malformed XML at
/// the document level is an error.
pub fn parse_pubmed_xml(xml: &str) -> Result<Vec<PubmedArticle>> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut articles = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"PubmedArticle" => {
                match parse_article(&mut reader) {
                    Ok(article) => articles.push(article),
                    Err(e) => log::debug!("Failed to parse article: {}", e),
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e).context("XML parse error"),
            _ => {}
        }
        buf.clear();
    }

    Ok(articles)
}

fn parse_article(reader: &mut Reader<&[u8]>) -> Result<PubmedArticle> {
    let mut article = PubmedArticle::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"MedlineCitation" => parse_medline_citation(reader, &mut article)?,
                b"PubmedData" => parse_pubmed_data(reader, &mut article)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedArticle" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(article)
}

fn parse_medline_citation(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"PMID" => article.pmid = read_text(reader)?,
                b"Article" => parse_article_element(reader, article)?,
                // Comments/corrections carry their own PMIDs
                b"CommentsCorrectionsList" => skip_element(reader, b"CommentsCorrectionsList")?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"MedlineCitation" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_article_element(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Journal" => parse_journal(reader, article)?,
                b"ArticleTitle" => {
                    article.title = Some(read_text_content(reader, b"ArticleTitle")?)
                }
                b"Abstract" => article.abstract_text = Some(parse_abstract(reader)?),
                b"AuthorList" => article.authors = parse_author_list(reader)?,
                b"ELocationID" => {
                    let is_doi = e.attributes().flatten().any(|attr| {
                        attr.key.as_ref() == b"EIdType" && attr.value.as_ref() == b"doi"
                    });
                    let value = read_text(reader)?;
                    if is_doi && article.doi.is_none() {
                        article.doi = Some(value);
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Article" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_journal(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Title" => article.journal_title = Some(read_text(reader)?),
                b"PubDate" => parse_pub_date(reader, article)?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Journal" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_pub_date(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"Year" => article.pub_year = read_text(reader)?.trim().parse().ok(),
                b"Month" => article.pub_month = parse_month(&read_text(reader)?),
                b"Day" => article.pub_day = read_text(reader)?.trim().parse().ok(),
                b"MedlineDate" => article.medline_date = Some(read_text(reader)?),
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubDate" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Numeric ("06") or abbreviated ("Jun", "June") month.
pub fn parse_month(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    let prefix = s.get(..3)?.to_ascii_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn parse_abstract(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    let mut text_parts = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"AbstractText" => {
                text_parts.push(read_text_content(reader, b"AbstractText")?);
            }
            Event::End(e) if e.name().as_ref() == b"Abstract" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text_parts.join(" "))
}

fn parse_author_list(reader: &mut Reader<&[u8]>) -> Result<Vec<Author>> {
    let mut authors = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"Author" => {
                authors.push(parse_author(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"AuthorList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(authors)
}

fn parse_author(reader: &mut Reader<&[u8]>) -> Result<Author> {
    let mut author = Author::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"LastName" => author.last_name = Some(read_text(reader)?),
                b"ForeName" => author.fore_name = Some(read_text(reader)?),
                b"Initials" => author.initials = Some(read_text(reader)?),
                b"CollectiveName" => author.collective_name = Some(read_text(reader)?),
                b"AffiliationInfo" => {
                    if let Some(aff) = parse_affiliation(reader)? {
                        author.affiliations.push(aff);
                    }
                }
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"Author" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(author)
}

fn parse_affiliation(reader: &mut Reader<&[u8]>) -> Result<Option<String>> {
    let mut buf = Vec::new();
    let mut affiliation = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"Affiliation" => {
                affiliation = Some(read_text(reader)?);
            }
            Event::End(e) if e.name().as_ref() == b"AffiliationInfo" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(affiliation)
}

fn parse_pubmed_data(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.name().as_ref() {
                b"ArticleIdList" => parse_article_id_list(reader, article)?,
                // References nest their own ArticleIdLists
                b"ReferenceList" => skip_element(reader, b"ReferenceList")?,
                _ => {}
            },
            Event::End(e) if e.name().as_ref() == b"PubmedData" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn parse_article_id_list(reader: &mut Reader<&[u8]>, article: &mut PubmedArticle) -> Result<()> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"ArticleId" => {
                let is_doi = e.attributes().flatten().any(|attr| {
                    attr.key.as_ref() == b"IdType" && attr.value.as_ref() == b"doi"
                });
                let value = read_text(reader)?;
                // ArticleIdList DOI wins over ELocationID
                if is_doi {
                    article.doi = Some(value);
                }
            }
            Event::End(e) if e.name().as_ref() == b"ArticleIdList" => break,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

fn skip_element(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(())
}

/// Read text content until next end tag
fn read_text(reader: &mut Reader<&[u8]>) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::End(_) => break,
            Event::Start(_) => {
                // Nested markup like <i>, <sup>
                text.push_str(&read_text(reader)?);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}

/// Read text content of a specific element, handling nested tags
fn read_text_content(reader: &mut Reader<&[u8]>, end_tag: &[u8]) -> Result<String> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::Start(_) => depth += 1,
            Event::End(e) => {
                depth -= 1;
                if depth == 0 && e.name().as_ref() == end_tag {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(text)
}
